//! AQI Forecast Pipeline
//!
//! Ingests hourly air-quality readings into an append-only dataset,
//! backfills deferred forecast labels, and serves 24/48/72 hour AQI
//! forecasts from daily-retrained regression models.

use anyhow::Result;
use aqi_forecast::commands;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::EnvFilter;

/// AQI ingestion and forecasting pipeline
#[derive(Parser)]
#[command(name = "aqi-forecast")]
#[command(about = "Hourly AQI ingestion and 24/48/72h forecasting pipeline")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one ingestion cycle: fetch, backfill, append, forecast
    Hourly,

    /// Retrain and reselect the per-horizon forecast models
    Train,

    /// Print dataset freshness and model metadata
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    match cli.command {
        Commands::Hourly => commands::hourly::run(&config).await?,
        Commands::Train => commands::train::run(&config).await?,
        Commands::Status => commands::status::run(&config).await?,
    }

    Ok(())
}
