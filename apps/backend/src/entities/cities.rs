use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "world_id")]
    pub world_id: i64,
    pub name: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::worlds::Entity",
        from = "Column::WorldId",
        to = "super::worlds::Column::Id"
    )]
    World,
    #[sea_orm(has_many = "super::city_goods::Entity")]
    CityGoods,
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
}

impl Related<super::worlds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::World.def()
    }
}

impl Related<super::city_goods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CityGoods.def()
    }
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
