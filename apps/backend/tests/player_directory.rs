mod common;

use backend::entities::players;
use backend::errors::domain::DomainError;
use backend::services::players::get_or_create_player;
use common::build_test_state;
use sea_orm::EntityTrait;

#[tokio::test]
async fn get_or_create_is_stable_per_name() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let db = &state.db;

    let first = get_or_create_player(db, "me").await?;
    let second = get_or_create_player(db, "me").await?;
    assert_eq!(first.id, second.id);

    // Exactly one row exists for the name
    let rows = players::Entity::find().all(db).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "me");

    Ok(())
}

#[tokio::test]
async fn new_players_start_broke_and_unseated() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;

    let player = get_or_create_player(&state.db, "fresh").await?;
    assert_eq!(player.money, 0);
    assert_eq!(player.game_id, None);

    Ok(())
}

#[tokio::test]
async fn distinct_names_get_distinct_players() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let db = &state.db;

    let me = get_or_create_player(db, "me").await?;
    let you = get_or_create_player(db, "you").await?;
    assert_ne!(me.id, you.id);

    Ok(())
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let state = build_test_state().await;

    let err = get_or_create_player(&state.db, "").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
