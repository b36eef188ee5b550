//! SeaORM adapter for world rows.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::worlds;
use crate::errors::domain::DomainError;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<worlds::Model>, DomainError> {
    worlds::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<worlds::Model>, DomainError> {
    worlds::Entity::find()
        .filter(worlds::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn list_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<worlds::Model>, DomainError> {
    worlds::Entity::find()
        .order_by_asc(worlds::Column::Id)
        .all(conn)
        .await
        .map_err(DomainError::from)
}
