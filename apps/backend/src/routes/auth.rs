//! Login and logout.
//!
//! Login is assertion-based: any non-empty name resolves to a player,
//! created on first sight. The player row and the session cookie are
//! issued from the same request.

use std::time::SystemTime;

use actix_web::cookie::Cookie;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::{mint_session_token, SESSION_COOKIE};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::{players, projection};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    name: String,
}

/// POST /api/login
async fn login(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;

    let (player_id, view) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = players::get_or_create_player(txn, &name).await?;
            let view = projection::project(txn, Some(&player)).await?;
            Ok((player.id, view))
        })
    })
    .await?;

    let token = mint_session_token(player_id, SystemTime::now(), &app_state.security)?;
    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(view))
}

/// POST /api/logout
///
/// Clears the session cookie. Always succeeds, logged in or not.
async fn logout() -> Result<HttpResponse, AppError> {
    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(projection::StateView::logged_out()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
    cfg.service(web::resource("/logout").route(web::post().to(logout)));
}
