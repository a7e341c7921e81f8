//! oxide-sqlkit CLI
//!
//! Runs the planets workload against SQLite, or prints the statements it
//! would send for any supported dialect.

mod planets;

use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use sqlx::Row;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_sqlkit_core::dialect::{self, SqliteDialect};
use oxide_sqlkit_core::{Database, Direction, DryRun};
use oxide_sqlkit_sqlite::SqliteConnection;

/// Dialect-portable SQL statement builder.
#[derive(Parser)]
#[command(name = "oxide-sqlkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL for commands that connect.
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    database: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the planets workload against the SQLite database.
    Planets,

    /// Print the planets workload as SQL without connecting (dry run).
    Sql {
        /// Target dialect.
        #[arg(long, default_value = "postgres", value_parser = ["postgres", "postgresql", "mysql", "sqlite"])]
        dialect: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Planets => {
            info!(database = %cli.database, "Connecting");
            let conn = SqliteConnection::connect(&cli.database).await?;
            let db = Database::new(SqliteDialect::new(), conn);

            planets::run(&db).await?;

            let rows = db
                .select()
                .columns(["id", "name"])
                .from("planets")
                .order_by("id", Direction::Asc)
                .all()
                .await?;
            for row in &rows {
                let id: i64 = row.try_get("id")?;
                let name: String = row.try_get("name")?;
                println!("{id}\t{name}");
            }
            info!(planets = rows.len(), "Planets workload finished");
        }

        Commands::Sql { dialect: name } => {
            let dialect =
                dialect::by_name(&name).ok_or_else(|| anyhow!("unknown dialect: {name}"))?;
            let db = Database::with_dialect(Arc::from(dialect), DryRun::new());

            planets::run(&db).await?;

            for query in db.connection().take() {
                println!("{};", query.sql);
                if !query.binds.is_empty() {
                    println!("-- binds: {:?}", query.binds);
                }
            }
        }
    }

    Ok(())
}
