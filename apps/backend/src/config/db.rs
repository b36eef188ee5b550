use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production database
    Prod,
    /// Test database - defaults to in-memory SQLite so test binaries are
    /// self-contained
    Test,
}

/// Build a database URL from environment variables for the given profile.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("CRAIL_DATABASE_URL"),
        DbProfile::Test => Ok(env::var("CRAIL_TEST_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite::memory:".to_string())),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::{db_url, DbProfile};

    #[test]
    fn test_db_url_test_profile_defaults_to_sqlite_memory() {
        env::remove_var("CRAIL_TEST_DATABASE_URL");
        let url = db_url(DbProfile::Test).unwrap();
        assert_eq!(url, "sqlite::memory:");
    }

    #[test]
    fn test_db_url_prod_requires_env() {
        env::remove_var("CRAIL_DATABASE_URL");
        assert!(db_url(DbProfile::Prod).is_err());
    }
}
