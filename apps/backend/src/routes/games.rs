//! Game lifecycle routes: create, join, leave.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{SessionPlayer, ValidatedJson};
use crate::services::{games, projection};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct JoinGameRequest {
    game: i64,
}

#[derive(Debug, Deserialize)]
struct NewGameRequest {
    world: i64,
}

/// POST /api/game/join
async fn join_game(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
    body: ValidatedJson<JoinGameRequest>,
) -> Result<HttpResponse, AppError> {
    let game_id = body.game;

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = games::current_player(txn, session.0).await?;
            let player = games::join_game(txn, player, game_id).await?;
            Ok(projection::project(txn, Some(&player)).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/game/leave
///
/// A successful no-op when not in a game.
async fn leave_game(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
) -> Result<HttpResponse, AppError> {
    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = games::current_player(txn, session.0).await?;
            let player = games::leave_game(txn, player).await?;
            Ok(projection::project(txn, Some(&player)).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/game/new
///
/// Creates a game in the named world; the creator joins it in the same
/// transaction.
async fn new_game(
    app_state: web::Data<AppState>,
    session: SessionPlayer,
    body: ValidatedJson<NewGameRequest>,
) -> Result<HttpResponse, AppError> {
    let world_id = body.world;

    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = games::current_player(txn, session.0).await?;
            let player = games::create_game(txn, player, world_id).await?;
            Ok(projection::project(txn, Some(&player)).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/game/join").route(web::post().to(join_game)));
    cfg.service(web::resource("/game/leave").route(web::post().to(leave_game)));
    cfg.service(web::resource("/game/new").route(web::post().to(new_game)));
}
