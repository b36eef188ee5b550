//! SeaORM adapter for player rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::players;
use crate::errors::domain::DomainError;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<players::Model>, DomainError> {
    players::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(DomainError::from)
}

/// All rows with this exact name. The caller decides what more than one
/// match means; the unique index should make it impossible.
pub async fn find_all_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Vec<players::Model>, DomainError> {
    players::Entity::find()
        .filter(players::Column::Name.eq(name))
        .all(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<players::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    players::ActiveModel {
        name: Set(name.to_owned()),
        money: Set(0),
        game_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

pub async fn set_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    game_id: Option<i64>,
) -> Result<players::Model, DomainError> {
    let mut active: players::ActiveModel = player.into();
    active.game_id = Set(game_id);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await.map_err(DomainError::from)
}

pub async fn add_money<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: players::Model,
    delta: i64,
) -> Result<players::Model, DomainError> {
    let money = player.money + delta;
    let mut active: players::ActiveModel = player.into();
    active.money = Set(money);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await.map_err(DomainError::from)
}

/// Every player currently seated in any game, for the lobby listing.
pub async fn all_seated<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, DomainError> {
    players::Entity::find()
        .filter(players::Column::GameId.is_not_null())
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
        .map_err(DomainError::from)
}
