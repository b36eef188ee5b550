use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database for the given profile. Does not migrate.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;

    let mut opts = ConnectOptions::new(url.clone());
    if url.starts_with("sqlite::memory:") {
        // Every pooled connection to an in-memory SQLite database sees a
        // different database; cap the pool at one.
        opts.max_connections(1);
    }

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date. Single entrypoint used by
/// `build_state` for both the server and tests.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migration::migrate(&conn, migration::MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;
    Ok(conn)
}
