//! In-play routes: money, drawing, discarding, contract completion.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::adapters::cards_sea;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{SessionPlayer, ValidatedJson};
use crate::services::{deck, games, projection};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct AmountRequest {
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct DiscardRequest {
    card: i64,
}

#[derive(Debug, Deserialize)]
struct CompleteRequest {
    contract: i64,
}

/// POST /api/gain
///
/// Credits any integer amount; there is no bound checking, and a
/// negative amount is a spend.
async fn gain_money(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
    body: ValidatedJson<AmountRequest>,
) -> Result<HttpResponse, AppError> {
    adjust_money(&app_state, session, body.amount).await
}

/// POST /api/spend
///
/// Identical to gain except for the sign.
async fn spend_money(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
    body: ValidatedJson<AmountRequest>,
) -> Result<HttpResponse, AppError> {
    adjust_money(&app_state, session, -body.amount).await
}

async fn adjust_money(
    app_state: &web::Data<AppState>,
    session: SessionPlayer,
    delta: i64,
) -> Result<HttpResponse, AppError> {
    let view = with_txn(app_state, |txn| {
        Box::pin(async move {
            let player = games::current_player(txn, session.0).await?;
            let player = games::adjust_money(txn, player, delta).await?;
            Ok(projection::project(txn, Some(&player)).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/draw
///
/// Draws one card from the game's deck into the hand. The deck tracks no
/// hand-size rule: drawing is always allowed while the player is seated.
async fn draw(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
) -> Result<HttpResponse, AppError> {
    let mut rng = rand::rng();

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = games::current_player(txn, session.0).await?;
            let game = games::current_game(txn, &player).await?;
            let card = deck::draw_card(txn, &mut rng, &game).await?;
            cards_sea::add_to_hand(txn, player.id, card.id).await?;
            Ok(projection::project(txn, Some(&player)).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/discard
///
/// Removes one held copy of the card. Discarding a card that is not in
/// the hand (or a nonexistent id) is a successful no-op.
async fn discard(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
    body: ValidatedJson<DiscardRequest>,
) -> Result<HttpResponse, AppError> {
    let card_id = body.card;

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = games::current_player(txn, session.0).await?;
            games::current_game(txn, &player).await?;
            games::discard_card(txn, &player, card_id).await?;
            Ok(projection::project(txn, Some(&player)).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/complete
///
/// Pays out the contract for every held card carrying it and discards
/// those cards. Holding none of them is a successful no-op.
async fn complete(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
    body: ValidatedJson<CompleteRequest>,
) -> Result<HttpResponse, AppError> {
    let contract_id = body.contract;

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = games::current_player(txn, session.0).await?;
            games::current_game(txn, &player).await?;
            let player = games::complete_contract(txn, player, contract_id).await?;
            Ok(projection::project(txn, Some(&player)).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/gain").route(web::post().to(gain_money)));
    cfg.service(web::resource("/spend").route(web::post().to(spend_money)));
    cfg.service(web::resource("/draw").route(web::post().to(draw)));
    cfg.service(web::resource("/discard").route(web::post().to(discard)));
    cfg.service(web::resource("/complete").route(web::post().to(complete)));
}
