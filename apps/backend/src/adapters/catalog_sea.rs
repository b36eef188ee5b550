//! SeaORM adapter for the reference catalog (worlds, cities, goods,
//! contracts, cards as written by the world loader).
//!
//! Upserts match on natural keys so re-importing a world definition is
//! idempotent.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::{card_contracts, cards, cities, city_goods, contracts, goods, worlds};
use crate::errors::domain::DomainError;

pub async fn goods_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<goods::Model>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    goods::Entity::find()
        .filter(goods::Column::Id.is_in(ids))
        .all(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn cities_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<cities::Model>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    cities::Entity::find()
        .filter(cities::Column::Id.is_in(ids))
        .all(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn find_good_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<goods::Model>, DomainError> {
    goods::Entity::find()
        .filter(goods::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn find_city_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    world_id: i64,
    name: &str,
) -> Result<Option<cities::Model>, DomainError> {
    cities::Entity::find()
        .filter(cities::Column::WorldId.eq(world_id))
        .filter(cities::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn upsert_world<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<worlds::Model, DomainError> {
    if let Some(world) = worlds::Entity::find()
        .filter(worlds::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(DomainError::from)?
    {
        return Ok(world);
    }
    worlds::ActiveModel {
        name: Set(name.to_owned()),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

pub async fn upsert_city<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    world_id: i64,
    name: &str,
) -> Result<cities::Model, DomainError> {
    if let Some(city) = find_city_by_name(conn, world_id, name).await? {
        return Ok(city);
    }
    cities::ActiveModel {
        world_id: Set(world_id),
        name: Set(name.to_owned()),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

pub async fn upsert_good<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<goods::Model, DomainError> {
    if let Some(good) = find_good_by_name(conn, name).await? {
        return Ok(good);
    }
    goods::ActiveModel {
        name: Set(name.to_owned()),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

pub async fn ensure_city_good<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    city_id: i64,
    good_id: i64,
) -> Result<(), DomainError> {
    let existing = city_goods::Entity::find()
        .filter(city_goods::Column::CityId.eq(city_id))
        .filter(city_goods::Column::GoodId.eq(good_id))
        .one(conn)
        .await
        .map_err(DomainError::from)?;
    if existing.is_some() {
        return Ok(());
    }
    city_goods::ActiveModel {
        city_id: Set(city_id),
        good_id: Set(good_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)?;
    Ok(())
}

/// Contracts are keyed by (good, city); a re-import overwrites the amount.
pub async fn upsert_contract<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    good_id: i64,
    city_id: i64,
    amount: i64,
) -> Result<contracts::Model, DomainError> {
    let existing = contracts::Entity::find()
        .filter(contracts::Column::GoodId.eq(good_id))
        .filter(contracts::Column::CityId.eq(city_id))
        .one(conn)
        .await
        .map_err(DomainError::from)?;

    match existing {
        Some(contract) if contract.amount == amount => Ok(contract),
        Some(contract) => {
            let mut active: contracts::ActiveModel = contract.into();
            active.amount = Set(amount);
            active.update(conn).await.map_err(DomainError::from)
        }
        None => contracts::ActiveModel {
            good_id: Set(good_id),
            city_id: Set(city_id),
            amount: Set(amount),
            created_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(DomainError::from),
    }
}

pub async fn find_card_by_number<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    world_id: i64,
    number: i32,
) -> Result<Option<cards::Model>, DomainError> {
    cards::Entity::find()
        .filter(cards::Column::WorldId.eq(world_id))
        .filter(cards::Column::Number.eq(number))
        .one(conn)
        .await
        .map_err(DomainError::from)
}

pub async fn insert_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    world_id: i64,
    number: Option<i32>,
    event: Option<String>,
) -> Result<cards::Model, DomainError> {
    cards::ActiveModel {
        world_id: Set(world_id),
        number: Set(number),
        event: Set(event),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)
}

pub async fn update_card_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card: cards::Model,
    event: Option<String>,
) -> Result<cards::Model, DomainError> {
    if card.event == event {
        return Ok(card);
    }
    let mut active: cards::ActiveModel = card.into();
    active.event = Set(event);
    active.update(conn).await.map_err(DomainError::from)
}

pub async fn ensure_card_contract<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
    contract_id: i64,
) -> Result<(), DomainError> {
    let existing = card_contracts::Entity::find()
        .filter(card_contracts::Column::CardId.eq(card_id))
        .filter(card_contracts::Column::ContractId.eq(contract_id))
        .one(conn)
        .await
        .map_err(DomainError::from)?;
    if existing.is_some() {
        return Ok(());
    }
    card_contracts::ActiveModel {
        card_id: Set(card_id),
        contract_id: Set(contract_id),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(DomainError::from)?;
    Ok(())
}
