use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "good_id")]
    pub good_id: i64,
    #[sea_orm(column_name = "city_id")]
    pub city_id: i64,
    pub amount: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::goods::Entity",
        from = "Column::GoodId",
        to = "super::goods::Column::Id"
    )]
    Good,
    #[sea_orm(
        belongs_to = "super::cities::Entity",
        from = "Column::CityId",
        to = "super::cities::Column::Id"
    )]
    City,
    #[sea_orm(has_many = "super::card_contracts::Entity")]
    CardContracts,
}

impl Related<super::goods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Good.def()
    }
}

impl Related<super::cities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::card_contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardContracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
