//! SeaORM entities for the crail schema.
//!
//! World/City/Good/Contract/Card are reference data created by the world
//! loader; Game/Player and the join tables are mutated during play.

pub mod card_contracts;
pub mod cards;
pub mod cities;
pub mod city_goods;
pub mod contracts;
pub mod games;
pub mod goods;
pub mod played_cards;
pub mod player_cards;
pub mod players;
pub mod worlds;
