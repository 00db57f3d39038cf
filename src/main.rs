//! Operator CLI for the sanctions screening client.
//!
//! Thin composition root: parses arguments, loads configuration, wires the
//! client, history store and connection monitor, and prints JSON results.
//! All screening logic lives in the library.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use sanctions_client::config::loader;
use sanctions_client::observability::{logging, metrics};
use sanctions_client::{
    ConnectionMonitor, InMemorySession, SanctionsClient, SearchHistoryStore, Shutdown,
};

#[derive(Parser)]
#[command(name = "sanctions-cli")]
#[command(about = "Query a sanctions/watchlist screening service", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults plus environment otherwise.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check upstream connectivity once
    Health,
    /// Search the watchlist by entity name
    Search { query: String },
    /// Fetch full details for one entity
    Detail { entity_id: String },
    /// Run the periodic connection monitor until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::load_default()?,
    };

    logging::init_logging(&config.observability.log_level);

    let client = Arc::new(SanctionsClient::new(&config)?);

    match cli.command {
        Commands::Health => {
            let status = client.check_health().await;
            print_json(&status)?;
        }
        Commands::Search { query } => {
            let history = SearchHistoryStore::new(Arc::new(InMemorySession::new()));
            let results = client.search(&query).await?;
            history.add(&query, results.len() as u64);
            print_json(&results)?;
        }
        Commands::Detail { entity_id } => {
            let detail = client.get_detail(&entity_id).await?;
            print_json(&detail)?;
        }
        Commands::Watch => {
            if config.observability.metrics_enabled {
                // Address validity is checked at config load time.
                if let Ok(addr) = config.observability.metrics_address.parse() {
                    metrics::init_metrics(addr);
                }
            }

            let shutdown = Shutdown::new();
            shutdown.trigger_on_ctrl_c();

            let monitor = ConnectionMonitor::new(client, &config.monitor);
            let worker = monitor.clone();
            let rx = shutdown.subscribe();
            let handle = tokio::spawn(async move { worker.run(rx).await });

            shutdown.triggered().await;
            handle.await?;
            print_json(monitor.status().as_ref())?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
