//! SeaORM adapter for contracts and their attachment to cards.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{card_contracts, contracts};
use crate::errors::domain::DomainError;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<contracts::Model>, DomainError> {
    contracts::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<contracts::Model>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    contracts::Entity::find()
        .filter(contracts::Column::Id.is_in(ids))
        .all(conn)
        .await
        .map_err(DomainError::from)
}

/// Cards this contract is printed on.
pub async fn cards_referencing<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    contract_id: i64,
) -> Result<Vec<i64>, DomainError> {
    let rows = card_contracts::Entity::find()
        .filter(card_contracts::Column::ContractId.eq(contract_id))
        .order_by_asc(card_contracts::Column::CardId)
        .all(conn)
        .await
        .map_err(DomainError::from)?;
    Ok(rows.into_iter().map(|r| r.card_id).collect())
}

/// Contract attachments for a set of cards, for the hand projection.
pub async fn links_for_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_ids: Vec<i64>,
) -> Result<Vec<card_contracts::Model>, DomainError> {
    if card_ids.is_empty() {
        return Ok(Vec::new());
    }
    card_contracts::Entity::find()
        .filter(card_contracts::Column::CardId.is_in(card_ids))
        .order_by_asc(card_contracts::Column::Id)
        .all(conn)
        .await
        .map_err(DomainError::from)
}
