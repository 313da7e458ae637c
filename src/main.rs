use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rankqueue::config::{LogFormat, LoggingConfig, ServiceConfig};
use rankqueue::queue::Tier;

#[derive(Parser)]
#[command(
    name = "rankqueue",
    about = "Dynamically re-ranked work-order queue service",
    version,
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file (overrides RANKQUEUE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Bind address (overrides server.listen_address)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show which tier a requester id falls into
    Tier {
        /// Requester id
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let mut config = ServiceConfig::resolve(cli.config.as_deref())?;
            init_tracing(&config.logging);

            if let Some(bind) = bind {
                config.server.listen_address = bind;
            }
            tracing::info!(bind = %config.server.listen_address, "Starting rankqueue daemon");
            rankqueue::serve(&config).await?;
        }
        Commands::Tier { id, json } => {
            let tier = Tier::for_id(id);
            if json {
                let output = serde_json::json!({ "id": id, "tier": tier });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{:<10} | {}", id, tier);
            }
        }
    }

    Ok(())
}
