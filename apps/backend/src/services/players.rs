//! Player directory.

use sea_orm::ConnectionTrait;

use crate::adapters::players_sea;
use crate::entities::players;
use crate::errors::domain::DomainError;

/// Resolve a display name to a player, creating the row on first login.
///
/// Stages only: the caller owns the transaction, so this composes with
/// session-cookie issuance (or anything else) in one atomic unit.
///
/// Exactly one existing row wins; more than one means the uniqueness
/// invariant is broken and the operation fails rather than silently
/// picking a row.
pub async fn get_or_create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<players::Model, DomainError> {
    if name.is_empty() {
        return Err(DomainError::validation("player name must not be empty"));
    }

    let mut matches = players_sea::find_all_by_name(conn, name).await?;
    match matches.len() {
        0 => players_sea::insert(conn, name).await,
        1 => Ok(matches.remove(0)),
        n => Err(DomainError::data_corruption(format!(
            "{n} player rows named {name:?}"
        ))),
    }
}
