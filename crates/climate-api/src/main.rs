//! Climate Observations API - Main Entry Point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use climate_api::{init_logging, run_server, Settings};
use tracing::info;

/// Read-only JSON API over climate observations
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (defaults to config/default.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    init_logging(cli.debug, settings.logging.json)?;
    info!("=== Climate API v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(settings).await
}
