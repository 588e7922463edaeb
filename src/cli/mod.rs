use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod expand;
pub mod import;
pub mod init;
pub mod migrate;
pub mod serve;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Initialize the storage directory and db schema
    Init {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Migrate the db schema
    Migrate {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Print a user's calendar occurrences as JSON
    Expand {
        #[arg(long)]
        user_id: String,
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Import a user's events saved by older clients
    ImportLegacy {
        #[arg(long)]
        user_id: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Init { db }) => {
            init::run(db, &config.db_path).await?;
        }
        Some(Command::Migrate { db }) => {
            migrate::run(db, &config.db_path).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        Some(Command::Expand { user_id, from, to }) => {
            init_tracing();
            expand::run(&user_id, from, to, &config).await?;
        }
        Some(Command::ImportLegacy { user_id }) => {
            init_tracing();
            import::run(&user_id, &config.db_path).await?;
        }
        None => {}
    }

    Ok(())
}
