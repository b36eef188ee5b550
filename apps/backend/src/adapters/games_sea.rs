//! SeaORM adapter for game rows.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::games;
use crate::errors::domain::DomainError;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<games::Model>, DomainError> {
    games::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    world_id: i64,
) -> Result<games::Model, DomainError> {
    games::ActiveModel {
        world_id: Set(world_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

pub async fn list_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<games::Model>, DomainError> {
    games::Entity::find()
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
        .map_err(DomainError::from)
}
