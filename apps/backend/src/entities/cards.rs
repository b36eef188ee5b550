use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "world_id")]
    pub world_id: i64,
    pub number: Option<i32>,
    pub event: Option<String>,
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
    #[sea_orm(has_many = "super::card_contracts::Entity")]
    CardContracts,
    #[sea_orm(has_many = "super::player_cards::Entity")]
    PlayerCards,
    #[sea_orm(has_many = "super::played_cards::Entity")]
    PlayedCards,
}

impl Related<super::worlds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::World.def()
    }
}

impl Related<super::card_contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardContracts.def()
    }
}

impl Related<super::player_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerCards.def()
    }
}

impl Related<super::played_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayedCards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
