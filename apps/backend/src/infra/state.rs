use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used by both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: DbProfile,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: DbProfile::Test,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        // single entrypoint: connect + migrate
        let conn = bootstrap_db(self.db_profile).await?;
        Ok(AppState::new(conn, self.security_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
