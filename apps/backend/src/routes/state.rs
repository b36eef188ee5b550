//! Read-only state endpoint.

use actix_web::{web, HttpResponse};

use crate::adapters::players_sea;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::MaybeSessionPlayer;
use crate::services::projection;
use crate::state::app_state::AppState;

/// GET /api/state
///
/// The current state projection. Works logged out (`{"player_id": null}`),
/// in the lobby, and in a game. A session cookie pointing at a player row
/// that no longer exists is treated as no session.
async fn state(
    app_state: web::Data<AppState>,
    session: MaybeSessionPlayer,
) -> Result<HttpResponse, AppError> {
    let view = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let player = match session.0 {
                Some(id) => players_sea::find_by_id(txn, id).await?,
                None => None,
            };
            Ok(projection::project(txn, player.as_ref()).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/state").route(web::get().to(state)));
}
