use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Worlds {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    WorldId,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Goods {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum CityGoods {
    Table,
    Id,
    CityId,
    GoodId,
    CreatedAt,
}

#[derive(Iden)]
enum Contracts {
    Table,
    Id,
    GoodId,
    CityId,
    Amount,
    CreatedAt,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    WorldId,
    Number,
    Event,
    CreatedAt,
}

#[derive(Iden)]
enum CardContracts {
    Table,
    Id,
    CardId,
    ContractId,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    WorldId,
    CreatedAt,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    Name,
    Money,
    GameId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlayerCards {
    Table,
    Id,
    PlayerId,
    CardId,
    CreatedAt,
}

#[derive(Iden)]
enum PlayedCards {
    Table,
    Id,
    GameId,
    CardId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // worlds
        manager
            .create_table(
                Table::create()
                    .table(Worlds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Worlds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Worlds::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Worlds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // goods (shared across worlds)
        manager
            .create_table(
                Table::create()
                    .table(Goods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Goods::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Goods::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Goods::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // cities
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cities::WorldId).big_integer().not_null())
                    .col(ColumnDef::new(Cities::Name).string().not_null())
                    .col(
                        ColumnDef::new(Cities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cities_world_id")
                            .from(Cities::Table, Cities::WorldId)
                            .to(Worlds::Table, Worlds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_cities_world_id_name")
                    .table(Cities::Table)
                    .col(Cities::WorldId)
                    .col(Cities::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // city_goods: which goods a city produces
        manager
            .create_table(
                Table::create()
                    .table(CityGoods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CityGoods::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(CityGoods::CityId).big_integer().not_null())
                    .col(ColumnDef::new(CityGoods::GoodId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CityGoods::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_city_goods_city_id")
                            .from(CityGoods::Table, CityGoods::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_city_goods_good_id")
                            .from(CityGoods::Table, CityGoods::GoodId)
                            .to(Goods::Table, Goods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_city_goods_city_id_good_id")
                    .table(CityGoods::Table)
                    .col(CityGoods::CityId)
                    .col(CityGoods::GoodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // contracts: demand for a good at a city
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Contracts::GoodId).big_integer().not_null())
                    .col(ColumnDef::new(Contracts::CityId).big_integer().not_null())
                    .col(ColumnDef::new(Contracts::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_good_id")
                            .from(Contracts::Table, Contracts::GoodId)
                            .to(Goods::Table, Goods::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_city_id")
                            .from(Contracts::Table, Contracts::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_contracts_good_id_city_id")
                    .table(Contracts::Table)
                    .col(Contracts::GoodId)
                    .col(Contracts::CityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // cards
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cards::WorldId).big_integer().not_null())
                    .col(ColumnDef::new(Cards::Number).integer().null())
                    .col(ColumnDef::new(Cards::Event).text().null())
                    .col(
                        ColumnDef::new(Cards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_world_id")
                            .from(Cards::Table, Cards::WorldId)
                            .to(Worlds::Table, Worlds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_cards_world_id")
                    .table(Cards::Table)
                    .col(Cards::WorldId)
                    .to_owned(),
            )
            .await?;

        // card_contracts: contracts printed on a card
        manager
            .create_table(
                Table::create()
                    .table(CardContracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CardContracts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(CardContracts::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardContracts::ContractId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardContracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_contracts_card_id")
                            .from(CardContracts::Table, CardContracts::CardId)
                            .to(Cards::Table, Cards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_card_contracts_contract_id")
                            .from(CardContracts::Table, CardContracts::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_card_contracts_card_id_contract_id")
                    .table(CardContracts::Table)
                    .col(CardContracts::CardId)
                    .col(CardContracts::ContractId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::WorldId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_world_id")
                            .from(Games::Table, Games::WorldId)
                            .to(Worlds::Table, Worlds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Players::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Players::Money)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Players::GameId).big_integer().null())
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_game_id")
                            .from(Players::Table, Players::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // player_cards: the hand. No unique (player_id, card_id) pair:
        // after a reshuffle a player can hold two copies of one card.
        manager
            .create_table(
                Table::create()
                    .table(PlayerCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerCards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_cards_player_id")
                            .from(PlayerCards::Table, PlayerCards::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_cards_card_id")
                            .from(PlayerCards::Table, PlayerCards::CardId)
                            .to(Cards::Table, Cards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_player_cards_player_id")
                    .table(PlayerCards::Table)
                    .col(PlayerCards::PlayerId)
                    .to_owned(),
            )
            .await?;

        // played_cards: deck-exhaustion ledger for the current shuffle epoch
        manager
            .create_table(
                Table::create()
                    .table(PlayedCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayedCards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(PlayedCards::GameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayedCards::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayedCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_played_cards_game_id")
                            .from(PlayedCards::Table, PlayedCards::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_played_cards_card_id")
                            .from(PlayedCards::Table, PlayedCards::CardId)
                            .to(Cards::Table, Cards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_played_cards_game_id_card_id")
                    .table(PlayedCards::Table)
                    .col(PlayedCards::GameId)
                    .col(PlayedCards::CardId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayedCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CardContracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CityGoods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Goods::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Worlds::Table).to_owned())
            .await?;
        Ok(())
    }
}
