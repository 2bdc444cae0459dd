//! Spendwise CLI - Personal spending analyzer
//!
//! Usage:
//!   spendwise analyze -t tx.csv -l limits.toml   Analyze a file
//!   spendwise serve --port 5000                  Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use spendwise_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            transactions,
            limits,
            today,
            json,
        } => commands::cmd_analyze(
            &config,
            &transactions,
            limits.as_deref(),
            today.as_deref(),
            json,
        ),
        Commands::Serve { host, port } => {
            commands::cmd_serve(&config, host.as_deref(), port).await
        }
    }
}
