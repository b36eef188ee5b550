#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod loader;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::session::{mint_session_token, verify_session_token, SessionClaims};
pub use config::db::{db_url, DbProfile};
pub use error::AppError;
pub use extractors::{MaybeSessionPlayer, SessionPlayer, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
