//! CLI argument definitions using clap
//!
//! The command implementations live in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwise - Track spending against monthly category limits
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Personal spending analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config dir, e.g. ~/.config/spendwise/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a transactions file against category limits
    Analyze {
        /// Transactions file (.csv or .json)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Category limits file (.json or .toml); every limit is 0 if omitted
        #[arg(short, long)]
        limits: Option<PathBuf>,

        /// Reference date (YYYY-MM-DD); defaults to the local date
        #[arg(long)]
        today: Option<String>,

        /// Print the analysis as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
