use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pooled database connection
    pub db: DatabaseConnection,
    /// Security configuration for session cookies
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self { db, security }
    }
}
