//! The state projection.
//!
//! Every operation, mutating or not, answers with this read-model so
//! clients never need a follow-up read. Three shapes: logged out, in the
//! lobby, in a game. Card fields are emitted only when present.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::{cards_sea, catalog_sea, contracts_sea, games_sea, players_sea, worlds_sea};
use crate::entities::players;
use crate::errors::domain::DomainError;

#[derive(Debug, Serialize)]
pub struct WorldView {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct GameView {
    pub id: i64,
    pub world: String,
    pub players: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractView {
    pub id: i64,
    pub good: String,
    pub city: String,
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct CardView {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contracts: Vec<ContractView>,
}

/// The single response shape of the whole API.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StateView {
    LoggedOut {
        player_id: Option<i64>,
    },
    Lobby {
        player_id: i64,
        player_name: String,
        games: Vec<GameView>,
        worlds: Vec<WorldView>,
    },
    InGame {
        player_id: i64,
        player_name: String,
        game: String,
        money: i64,
        cards: Vec<CardView>,
    },
}

impl StateView {
    pub fn logged_out() -> Self {
        StateView::LoggedOut { player_id: None }
    }
}

/// Build the state view for the current player (or the logged-out view).
/// Always recomputed from the transaction's current data.
pub async fn project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: Option<&players::Model>,
) -> Result<StateView, DomainError> {
    let Some(player) = player else {
        return Ok(StateView::logged_out());
    };

    match player.game_id {
        None => lobby_view(conn, player).await,
        Some(game_id) => in_game_view(conn, player, game_id).await,
    }
}

async fn lobby_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &players::Model,
) -> Result<StateView, DomainError> {
    let worlds = worlds_sea::list_ordered(conn).await?;
    let world_names: HashMap<i64, &str> =
        worlds.iter().map(|w| (w.id, w.name.as_str())).collect();

    let mut members: HashMap<i64, Vec<String>> = HashMap::new();
    for seated in players_sea::all_seated(conn).await? {
        if let Some(game_id) = seated.game_id {
            members.entry(game_id).or_default().push(seated.name);
        }
    }

    let mut games = Vec::new();
    for game in games_sea::list_ordered(conn).await? {
        let world = world_names.get(&game.world_id).copied().ok_or_else(|| {
            DomainError::data_corruption(format!(
                "game {} references missing world {}",
                game.id, game.world_id
            ))
        })?;
        games.push(GameView {
            id: game.id,
            world: world.to_string(),
            players: members.remove(&game.id).unwrap_or_default(),
        });
    }

    Ok(StateView::Lobby {
        player_id: player.id,
        player_name: player.name.clone(),
        games,
        worlds: worlds
            .into_iter()
            .map(|w| WorldView {
                id: w.id,
                name: w.name,
            })
            .collect(),
    })
}

async fn in_game_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &players::Model,
    game_id: i64,
) -> Result<StateView, DomainError> {
    let game = games_sea::find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::data_corruption(format!(
            "player {} references missing game {game_id}",
            player.id
        ))
    })?;
    let world = worlds_sea::find_by_id(conn, game.world_id)
        .await?
        .ok_or_else(|| {
            DomainError::data_corruption(format!(
                "game {} references missing world {}",
                game.id, game.world_id
            ))
        })?;

    // Hand rows in draw order; a duplicate copy renders as its own card.
    let hand = cards_sea::hand_rows(conn, player.id).await?;
    let card_ids: Vec<i64> = hand.iter().map(|row| row.card_id).collect();

    let mut distinct = card_ids.clone();
    distinct.sort_unstable();
    distinct.dedup();

    let cards_by_id: HashMap<i64, _> = cards_sea::by_ids(conn, distinct.clone())
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    // Contract attachments, resolved to good/city names in bulk.
    let links = contracts_sea::links_for_cards(conn, distinct).await?;
    let contract_ids: Vec<i64> = {
        let mut ids: Vec<i64> = links.iter().map(|l| l.contract_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    };
    let contracts_by_id: HashMap<i64, _> = contracts_sea::by_ids(conn, contract_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let good_ids: Vec<i64> = contracts_by_id.values().map(|c| c.good_id).collect();
    let city_ids: Vec<i64> = contracts_by_id.values().map(|c| c.city_id).collect();
    let good_names: HashMap<i64, String> = catalog_sea::goods_by_ids(conn, good_ids)
        .await?
        .into_iter()
        .map(|g| (g.id, g.name))
        .collect();
    let city_names: HashMap<i64, String> = catalog_sea::cities_by_ids(conn, city_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut contracts_per_card: HashMap<i64, Vec<ContractView>> = HashMap::new();
    for link in links {
        let contract = contracts_by_id.get(&link.contract_id).ok_or_else(|| {
            DomainError::data_corruption(format!(
                "card {} references missing contract {}",
                link.card_id, link.contract_id
            ))
        })?;
        let good = good_names.get(&contract.good_id).cloned().ok_or_else(|| {
            DomainError::data_corruption(format!(
                "contract {} references missing good {}",
                contract.id, contract.good_id
            ))
        })?;
        let city = city_names.get(&contract.city_id).cloned().ok_or_else(|| {
            DomainError::data_corruption(format!(
                "contract {} references missing city {}",
                contract.id, contract.city_id
            ))
        })?;
        contracts_per_card
            .entry(link.card_id)
            .or_default()
            .push(ContractView {
                id: contract.id,
                good,
                city,
                amount: contract.amount,
            });
    }

    let mut cards = Vec::with_capacity(hand.len());
    for row in hand {
        let card = cards_by_id.get(&row.card_id).ok_or_else(|| {
            DomainError::data_corruption(format!(
                "hand row {} references missing card {}",
                row.id, row.card_id
            ))
        })?;
        cards.push(CardView {
            id: card.id,
            number: card.number,
            event: card.event.clone(),
            contracts: contracts_per_card.get(&card.id).cloned().unwrap_or_default(),
        });
    }

    Ok(StateView::InGame {
        player_id: player.id,
        player_name: player.name.clone(),
        game: world.name,
        money: player.money,
        cards,
    })
}

#[cfg(test)]
mod tests {
    use super::StateView;

    #[test]
    fn logged_out_serializes_to_null_player_id() {
        let json = serde_json::to_value(StateView::logged_out()).unwrap();
        assert_eq!(json, serde_json::json!({ "player_id": null }));
    }

    #[test]
    fn card_view_omits_absent_fields() {
        let card = super::CardView {
            id: 3,
            number: None,
            event: None,
            contracts: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&card).unwrap(),
            serde_json::json!({ "id": 3 })
        );
    }
}
