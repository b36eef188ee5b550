mod common;
mod support;

use actix_web::cookie::Cookie;
use actix_web::test;
use backend::adapters::catalog_sea;
use backend::loader;
use common::{assert_problem, build_test_state, login, post_json};
use serde_json::{json, Value};
use support::create_test_app;

/// Log in and create a game in world 1. Expects a seeded world.
async fn bootstrap_game<S>(app: &S) -> Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let (cookie, _body) = login(app, "me").await;
    let resp = post_json(app, "/api/game/new", json!({ "world": 1 }), Some(&cookie)).await;
    assert_eq!(resp.status().as_u16(), 200);
    cookie
}

#[actix_web::test]
async fn test_gain_and_spend_money() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    catalog_sea::upsert_world(&state.db, "world").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    let resp = post_json(&app, "/api/gain", json!({ "amount": 5 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["money"], 5);

    let resp = post_json(&app, "/api/spend", json!({ "amount": 17 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["money"], 5 - 17);

    Ok(())
}

#[actix_web::test]
async fn test_money_symmetry() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    catalog_sea::upsert_world(&state.db, "world").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    // gain(x) then spend(x) returns to the prior balance, negative and
    // zero amounts included
    let mut expected = 0i64;
    for x in [5i64, 0, -3, 1_000_000] {
        let resp = post_json(&app, "/api/gain", json!({ "amount": x }), Some(&cookie)).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["money"], expected + x);

        let resp = post_json(&app, "/api/spend", json!({ "amount": x }), Some(&cookie)).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["money"], expected);
    }

    // and spending drives the balance below zero with no floor
    let resp = post_json(&app, "/api/spend", json!({ "amount": 40 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    expected -= 40;
    assert_eq!(body["money"], expected);

    Ok(())
}

#[actix_web::test]
async fn test_draw_discard_one_event_card() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let world = catalog_sea::upsert_world(&state.db, "world").await?;
    catalog_sea::insert_card(&state.db, world.id, Some(123), Some("oh noes!".into())).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    let resp = post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["cards"],
        json!([{ "id": 1, "number": 123, "event": "oh noes!" }])
    );

    // Discarding a card that is not in the hand is a silent no-op
    let resp = post_json(&app, "/api/discard", json!({ "card": 2 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["cards"].as_array().unwrap().len(), 1);

    let resp = post_json(&app, "/api/discard", json!({ "card": 1 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["cards"], json!([]));

    // The discard did not un-play the card; drawing again reshuffles
    // and deals the same card once more
    let resp = post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["cards"],
        json!([{ "id": 1, "number": 123, "event": "oh noes!" }])
    );

    Ok(())
}

#[actix_web::test]
async fn test_hand_can_hold_duplicate_copies() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let world = catalog_sea::upsert_world(&state.db, "world").await?;
    catalog_sea::insert_card(&state.db, world.id, Some(1), None).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    // Second draw reshuffles and deals the same card again; the hand
    // holds two copies
    post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let resp = post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["cards"], json!([{ "id": 1, "number": 1 }, { "id": 1, "number": 1 }]));

    // Discard removes one copy at a time
    let resp = post_json(&app, "/api/discard", json!({ "card": 1 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["cards"], json!([{ "id": 1, "number": 1 }]));

    Ok(())
}

#[actix_web::test]
async fn test_draw_exhausts_deck_before_reshuffle() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    let world = catalog_sea::upsert_world(&state.db, "world").await?;
    catalog_sea::insert_card(&state.db, world.id, Some(1), None).await?;
    catalog_sea::insert_card(&state.db, world.id, Some(2), None).await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    // Outcomes are random; treat each epoch as a set. Two draws must
    // yield both cards, a third starts the next epoch.
    let mut hand: Vec<i64> = Vec::new();
    for _ in 0..3 {
        let resp = post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
        let body: Value = test::read_body_json(resp).await;
        hand = body["cards"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
    }

    assert_eq!(hand.len(), 3);
    let mut first_epoch = hand[..2].to_vec();
    first_epoch.sort_unstable();
    assert_eq!(first_epoch, vec![1, 2]);
    assert!(hand[2] == 1 || hand[2] == 2);

    Ok(())
}

#[actix_web::test]
async fn test_draw_complete_two_contracts() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;

    let def = loader::parse_world_def(
        r#"
name: world
cities:
  here: [stuff]
  there: [things]
  elsewhere: [cruft]
cards:
  - number: 1
    contracts:
      - [stuff, there, 5]
      - [things, elsewhere, 7]
      - [cruft, here, 9]
  - number: 2
    event: "FOO!"
"#,
    )?;
    loader::import_world(&state.db, &def).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    // Draw both cards; order is random
    post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let resp = post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["money"], 0);
    let mut cards = body["cards"].as_array().unwrap().clone();
    cards.sort_by_key(|c| c["id"].as_i64());
    assert_eq!(cards.len(), 2);

    assert_eq!(cards[0]["id"], 1);
    assert_eq!(cards[0]["number"], 1);
    let mut contracts = cards[0]["contracts"].as_array().unwrap().clone();
    contracts.sort_by_key(|c| c["id"].as_i64());
    assert_eq!(
        contracts,
        vec![
            json!({ "id": 1, "good": "stuff", "city": "there", "amount": 5 }),
            json!({ "id": 2, "good": "things", "city": "elsewhere", "amount": 7 }),
            json!({ "id": 3, "good": "cruft", "city": "here", "amount": 9 }),
        ]
    );
    assert_eq!(cards[1], json!({ "id": 2, "number": 2, "event": "FOO!" }));

    // Completing contract 2 pays its amount and discards the carrying
    // card, leaving the event card untouched
    let resp = post_json(&app, "/api/complete", json!({ "contract": 2 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "player_id": 1,
            "player_name": "me",
            "game": "world",
            "money": 7,
            "cards": [{ "id": 2, "number": 2, "event": "FOO!" }]
        })
    );

    Ok(())
}

#[actix_web::test]
async fn test_complete_not_held_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;

    let def = loader::parse_world_def(
        r#"
name: world
cities:
  there: [stuff]
cards:
  - number: 1
    contracts:
      - [stuff, there, 5]
"#,
    )?;
    loader::import_world(&state.db, &def).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    // Contract 1 exists but no card carrying it is held
    let resp = post_json(&app, "/api/complete", json!({ "contract": 1 }), Some(&cookie)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["money"], 0);
    assert_eq!(body["cards"], json!([]));

    Ok(())
}

#[actix_web::test]
async fn test_complete_unknown_contract_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    catalog_sea::upsert_world(&state.db, "world").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let cookie = bootstrap_game(&app).await;

    let resp = post_json(&app, "/api/complete", json!({ "contract": 42 }), Some(&cookie)).await;
    assert_problem(resp, 400, "CONTRACT_NOT_FOUND").await;

    Ok(())
}

#[actix_web::test]
async fn test_deck_operations_require_a_game() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;
    catalog_sea::upsert_world(&state.db, "world").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let (cookie, _body) = login(&app, "me").await;

    for (path, body) in [
        ("/api/draw", json!({})),
        ("/api/discard", json!({ "card": 1 })),
        ("/api/complete", json!({ "contract": 1 })),
    ] {
        let resp = post_json(&app, path, body, Some(&cookie)).await;
        assert_problem(resp, 400, "VALIDATION_ERROR").await;
    }

    Ok(())
}

#[actix_web::test]
async fn test_end_to_end_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await;

    let def = loader::parse_world_def(
        r#"
name: two rivers
cities:
  fork: [coal]
cards:
  - number: 1
    contracts:
      - [coal, fork, 11]
  - number: 2
    event: "derailment"
"#,
    )?;
    loader::import_world(&state.db, &def).await?;

    let app = create_test_app(state).with_prod_routes().build().await?;

    let (cookie, _body) = login(&app, "me").await;
    post_json(&app, "/api/game/new", json!({ "world": 1 }), Some(&cookie)).await;

    // Two draws from a two-card world put both cards in hand
    post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let resp = post_json(&app, "/api/draw", json!({}), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    let mut ids: Vec<i64> = body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2]);

    // Discard removes only the named card
    let resp = post_json(&app, "/api/discard", json!({ "card": 2 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["cards"].as_array().unwrap().len(), 1);
    assert_eq!(body["cards"][0]["id"], 1);

    // Completing the contract credits its amount and removes the card
    let resp = post_json(&app, "/api/complete", json!({ "contract": 1 }), Some(&cookie)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["money"], 11);
    assert_eq!(body["cards"], json!([]));

    Ok(())
}
