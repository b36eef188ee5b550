//! Deck engine: draw-with-reshuffle.
//!
//! The deck has no materialized state of its own. The drawable pool for a
//! game is the world's card set minus the game's played-card ledger;
//! reshuffling is a ledger truncation.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::adapters::cards_sea;
use crate::entities::{cards, games};
use crate::errors::domain::DomainError;

/// Draw one card for a game, uniformly at random from the cards not yet
/// played this epoch. When the pool is exhausted the ledger is cleared
/// and the whole world's card set becomes drawable again.
///
/// Stages the ledger insert on `conn` without committing, so the caller
/// can put the card into a hand in the same transaction.
///
/// A world with zero cards is an undefined card universe: that is a data
/// error, not an empty draw.
pub async fn draw_card<C, R>(
    conn: &C,
    rng: &mut R,
    game: &games::Model,
) -> Result<cards::Model, DomainError>
where
    C: ConnectionTrait + Send + Sync,
    R: Rng + ?Sized,
{
    let all = cards_sea::cards_of_world(conn, game.world_id).await?;
    let played: HashSet<i64> = cards_sea::played_card_ids(conn, game.id)
        .await?
        .into_iter()
        .collect();

    let mut pool: Vec<&cards::Model> = all.iter().filter(|c| !played.contains(&c.id)).collect();

    if pool.is_empty() {
        // reshuffle
        cards_sea::clear_played(conn, game.id).await?;
        pool = all.iter().collect();
    }

    let card = pool
        .choose(rng)
        .map(|c| (*c).clone())
        .ok_or_else(|| {
            DomainError::data_corruption(format!(
                "world {} has no cards to draw for game {}",
                game.world_id, game.id
            ))
        })?;

    cards_sea::mark_played(conn, game.id, card.id).await?;
    Ok(card)
}
