pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20260715_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260715_000001_init::Migration)]
    }
}

#[derive(Debug)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run a migration command against an already-connected database.
///
/// Shared by the CLI and by test bootstrap so neither has to go through
/// environment parsing twice.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let applied_before = count_applied_migrations(db).await.unwrap_or(0);
    let defined = Migrator::migrations().len();
    tracing::info!(
        "migrate cmd={command:?}: {defined} migration(s) defined, {applied_before} applied"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if !matches!(command, MigrationCommand::Status) {
                let applied_after = count_applied_migrations(db).await.unwrap_or(0);
                tracing::info!("migrate cmd={command:?} ok, {applied_after} applied");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("migrate cmd={command:?} failed: {e}");
            Err(e)
        }
    }
}

/// Count applied migrations; 0 if the migration table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
