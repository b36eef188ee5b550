//! SeaORM adapter for cards, the hand, and the played-card ledger.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::{cards, played_cards, player_cards};
use crate::errors::domain::DomainError;

pub async fn cards_of_world<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    world_id: i64,
) -> Result<Vec<cards::Model>, DomainError> {
    cards::Entity::find()
        .filter(cards::Column::WorldId.eq(world_id))
        .order_by_asc(cards::Column::Id)
        .all(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<cards::Model>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    cards::Entity::find()
        .filter(cards::Column::Id.is_in(ids))
        .all(conn)
        .await
        .map_err(DomainError::from)
}

// ----- played-card ledger -----

pub async fn played_card_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<i64>, DomainError> {
    let rows = played_cards::Entity::find()
        .filter(played_cards::Column::GameId.eq(game_id))
        .all(conn)
        .await
        .map_err(DomainError::from)?;
    Ok(rows.into_iter().map(|r| r.card_id).collect())
}

/// Reshuffle: truncate the ledger for one game. The drawable pool reverts
/// to the world's full card set; no card data is copied anywhere.
pub async fn clear_played<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    let res = played_cards::Entity::delete_many()
        .filter(played_cards::Column::GameId.eq(game_id))
        .exec(conn)
        .await
        .map_err(DomainError::from)?;
    Ok(res.rows_affected)
}

pub async fn mark_played<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    card_id: i64,
) -> Result<played_cards::Model, DomainError> {
    played_cards::ActiveModel {
        game_id: Set(game_id),
        card_id: Set(card_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

// ----- the hand -----

pub async fn hand_rows<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<player_cards::Model>, DomainError> {
    player_cards::Entity::find()
        .filter(player_cards::Column::PlayerId.eq(player_id))
        .order_by_asc(player_cards::Column::Id)
        .all(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn add_to_hand<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    card_id: i64,
) -> Result<player_cards::Model, DomainError> {
    player_cards::ActiveModel {
        player_id: Set(player_id),
        card_id: Set(card_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

/// First held copy of a card, if any. One row per held copy, so a
/// duplicate after a reshuffle is discarded one copy at a time.
pub async fn find_held<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    card_id: i64,
) -> Result<Option<player_cards::Model>, DomainError> {
    player_cards::Entity::find()
        .filter(player_cards::Column::PlayerId.eq(player_id))
        .filter(player_cards::Column::CardId.eq(card_id))
        .order_by_asc(player_cards::Column::Id)
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn remove_hand_row<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    row_id: i64,
) -> Result<(), DomainError> {
    player_cards::Entity::delete_by_id(row_id)
        .exec(conn)
        .await
        .map_err(DomainError::from)?;
    Ok(())
}
