use std::path::PathBuf;

use backend::config::db::DbProfile;
use backend::infra::db::connect_db;
use backend::loader;
use clap::{Parser, Subcommand, ValueEnum};
use migration::MigrationCommand;
use sea_orm::TransactionTrait;

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

impl From<Env> for DbProfile {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => DbProfile::Prod,
            Env::Test => DbProfile::Test,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum MigrateCmd {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<MigrateCmd> for MigrationCommand {
    fn from(cmd: MigrateCmd) -> Self {
        match cmd {
            MigrateCmd::Up => MigrationCommand::Up,
            MigrateCmd::Down => MigrationCommand::Down,
            MigrateCmd::Fresh => MigrationCommand::Fresh,
            MigrateCmd::Reset => MigrationCommand::Reset,
            MigrateCmd::Refresh => MigrationCommand::Refresh,
            MigrateCmd::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Parser)]
#[command(name = "crail")]
#[command(about = "crail schema migration and world-data tool")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "prod", global = true)]
    env: Env,
}

#[derive(Subcommand)]
enum Command {
    /// Run a schema migration command
    Migrate {
        #[arg(value_enum)]
        command: MigrateCmd,
    },
    /// Import a YAML world definition (cities, goods, cards, contracts)
    Load {
        /// Path to the world definition file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,backend=info,sqlx=warn")
        .init();

    let args = Args::parse();
    let profile: DbProfile = args.env.into();

    let conn = match connect_db(profile).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Migrate { command } => {
            if let Err(e) = migration::migrate(&conn, command.into()).await {
                eprintln!("❌ Migration failed: {e}");
                std::process::exit(1);
            }
        }
        Command::Load { file } => {
            let contents = match std::fs::read_to_string(&file) {
                Ok(contents) => contents,
                Err(e) => {
                    eprintln!("❌ Cannot read {}: {e}", file.display());
                    std::process::exit(1);
                }
            };

            let def = match loader::parse_world_def(&contents) {
                Ok(def) => def,
                Err(e) => {
                    eprintln!("❌ {e}");
                    std::process::exit(1);
                }
            };

            // One transaction for the whole import: a bad reference
            // aborts it with nothing partial committed.
            let txn = match conn.begin().await {
                Ok(txn) => txn,
                Err(e) => {
                    eprintln!("❌ Failed to open transaction: {e}");
                    std::process::exit(1);
                }
            };

            match loader::import_world(&txn, &def).await {
                Ok(report) => {
                    if let Err(e) = txn.commit().await {
                        eprintln!("❌ Failed to commit import: {e}");
                        std::process::exit(1);
                    }
                    println!(
                        "✅ Imported world '{}' (id {}): {} cities, {} cards, {} contracts",
                        def.name, report.world_id, report.cities, report.cards, report.contracts
                    );
                }
                Err(e) => {
                    let _ = txn.rollback().await;
                    eprintln!("❌ Import aborted: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
