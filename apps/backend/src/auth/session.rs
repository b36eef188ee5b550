//! Session tokens.
//!
//! Login is assertion-based: any name is accepted and resolves to a
//! player row. The session is an HS256 JWT carried in a cookie, holding
//! nothing but the player id and timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Name of the session cookie set by login and cleared by logout.
pub const SESSION_COOKIE: &str = "crail_session";

/// Sessions outlive a game night comfortably.
const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Claims included in session tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Player id, stringified
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl SessionClaims {
    pub fn player_id(&self) -> Result<i64, AppError> {
        self.sub.parse().map_err(|_| AppError::unauthorized())
    }
}

/// Mint a session token for a player id.
pub fn mint_session_token(
    player_id: i64,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = SessionClaims {
        sub: player_id.to_string(),
        iat,
        exp: iat + SESSION_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
}

/// Verify a session token and return its claims.
///
/// Any failure (expiry, bad signature, malformed token) collapses to
/// `Unauthorized`; the client's recourse is the same in every case.
pub fn verify_session_token(token: &str, security: &SecurityConfig) -> Result<SessionClaims, AppError> {
    let validation = Validation::new(security.algorithm);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::{mint_session_token, verify_session_token};
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn mint_and_verify_roundtrip() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());
        let token = mint_session_token(42, SystemTime::now(), &security).unwrap();
        let claims = verify_session_token(&token, &security).unwrap();
        assert_eq!(claims.player_id().unwrap(), 42);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let security = SecurityConfig::new("secret_one".as_bytes());
        let other = SecurityConfig::new("secret_two".as_bytes());
        let token = mint_session_token(7, SystemTime::now(), &security).unwrap();
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = SecurityConfig::default();
        let past = SystemTime::now() - Duration::from_secs(60 * 60 * 24 * 365);
        let token = mint_session_token(7, past, &security).unwrap();
        assert!(verify_session_token(&token, &security).is_err());
    }
}
