//! Game lifecycle: join/leave/create, money, discard, contract completion.
//!
//! Every operation stages its changes on the passed transaction and
//! returns the refreshed player row; the enclosing request handler
//! commits once and projects the state from the returned row.

use sea_orm::ConnectionTrait;

use crate::adapters::{cards_sea, contracts_sea, games_sea, players_sea, worlds_sea};
use crate::entities::{games, players};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Load the player row a session cookie points at. A stale id (row gone)
/// is a client error, same as acting without a session.
pub async fn current_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<players::Model, DomainError> {
    players_sea::find_by_id(conn, player_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("player {player_id} not found"))
        })
}

/// The game the player is seated in. Operations on the deck and hand
/// require one.
pub async fn current_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &players::Model,
) -> Result<games::Model, DomainError> {
    let game_id = player
        .game_id
        .ok_or_else(|| DomainError::validation("player is not in a game"))?;

    // The FK sets game_id to null when a game row goes away, so a miss
    // here is corruption, not a user error.
    games_sea::find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::data_corruption(format!("player {} references missing game {game_id}", player.id))
    })
}

/// Create a game in a world and seat the acting player in it.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    world_id: i64,
) -> Result<players::Model, DomainError> {
    let world = worlds_sea::find_by_id(conn, world_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::World, format!("world {world_id} not found"))
        })?;

    let game = games_sea::insert(conn, world.id).await?;
    players_sea::set_game(conn, player, Some(game.id)).await
}

/// Seat the acting player in an existing game. Joining a game you are
/// already in is a no-op; there is no capacity limit.
pub async fn join_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    game_id: i64,
) -> Result<players::Model, DomainError> {
    let game = games_sea::find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
    })?;

    players_sea::set_game(conn, player, Some(game.id)).await
}

/// Unseat the acting player. Leaving while not in a game succeeds.
pub async fn leave_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
) -> Result<players::Model, DomainError> {
    players_sea::set_game(conn, player, None).await
}

/// Credit `delta` to the balance. Spending is a negated gain; there is no
/// floor or ceiling.
pub async fn adjust_money<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    delta: i64,
) -> Result<players::Model, DomainError> {
    players_sea::add_money(conn, player, delta).await
}

/// Remove one held copy of a card from the hand. Discarding a card that
/// is not held (or does not exist) leaves state unchanged — the hand is
/// already in the desired end state. The played-card ledger is untouched:
/// discarded cards do not re-enter the drawable pool this epoch.
pub async fn discard_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &players::Model,
    card_id: i64,
) -> Result<(), DomainError> {
    if let Some(row) = cards_sea::find_held(conn, player.id, card_id).await? {
        cards_sea::remove_hand_row(conn, row.id).await?;
    }
    Ok(())
}

/// Complete a contract: for every card carrying this contract that the
/// player holds, credit the contract amount and discard that card. A
/// contract held via no card is a no-op; a contract id that does not
/// exist at all is a client error.
pub async fn complete_contract<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    contract_id: i64,
) -> Result<players::Model, DomainError> {
    let contract = contracts_sea::find_by_id(conn, contract_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Contract,
                format!("contract {contract_id} not found"),
            )
        })?;

    let mut player = player;
    for card_id in contracts_sea::cards_referencing(conn, contract.id).await? {
        if let Some(row) = cards_sea::find_held(conn, player.id, card_id).await? {
            cards_sea::remove_hand_row(conn, row.id).await?;
            player = players_sea::add_money(conn, player, contract.amount).await?;
        }
    }
    Ok(player)
}
