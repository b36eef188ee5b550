//! Session extractors.
//!
//! The session cookie is resolved once per request into a player id that
//! handlers receive by value; nothing downstream touches cookies or any
//! request-global handle.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::session::{verify_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Player id asserted by the session cookie. Required: extraction fails
/// with 401 when the cookie is missing or does not verify.
#[derive(Debug, Clone, Copy)]
pub struct SessionPlayer(pub i64);

/// Optional variant for endpoints that serve logged-out clients too
/// (`GET /api/state`). An absent or invalid cookie is simply `None`.
#[derive(Debug, Clone, Copy)]
pub struct MaybeSessionPlayer(pub Option<i64>);

fn session_player_id(req: &HttpRequest) -> Result<Option<i64>, AppError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState missing from app_data"))?;

    match verify_session_token(cookie.value(), &state.security) {
        Ok(claims) => Ok(Some(claims.player_id()?)),
        // A stale or tampered cookie is indistinguishable from no session
        Err(_) => Ok(None),
    }
}

impl FromRequest for SessionPlayer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(session_player_id(req).and_then(|id| {
            id.map(SessionPlayer).ok_or_else(AppError::unauthorized)
        }))
    }
}

impl FromRequest for MaybeSessionPlayer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(session_player_id(req).map(MaybeSessionPlayer))
    }
}
