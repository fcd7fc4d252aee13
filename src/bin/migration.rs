use clap::{Parser, Subcommand};
use inventory_api::migrator::Migrator;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::prelude::*;
use std::time::Duration;
use tracing::{error, info};

/// Applies or rolls back the inventory schema
#[derive(Parser)]
#[command(name = "migration", version, about)]
struct Cli {
    /// Database URL; falls back to the DATABASE_URL environment variable
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://inventory.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back the most recent migrations
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// List applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    info!("Connecting to database: {}", cli.database_url);

    let mut options = ConnectOptions::new(cli.database_url);
    options
        .max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true);

    let db = Database::connect(options).await?;

    let result = match cli.command.unwrap_or(Command::Up) {
        Command::Up => Migrator::up(&db, None).await,
        Command::Down { steps } => Migrator::down(&db, Some(steps)).await,
        Command::Status => {
            for migration in Migrator::get_applied_migrations(&db).await? {
                println!("applied  {}", migration.name());
            }
            for migration in Migrator::get_pending_migrations(&db).await? {
                println!("pending  {}", migration.name());
            }
            Ok(())
        }
    };

    match &result {
        Ok(()) => info!("Migration command completed successfully"),
        Err(e) => error!("Migration command failed: {}", e),
    }

    result
}
