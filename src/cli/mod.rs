//! CLI interface for cryptoml-signals
//!
//! Provides subcommands for:
//! - `run`: Poll the prediction service and report buy streaks
//! - `fetch`: Print one raw prediction response
//! - `config`: Show the effective configuration

mod fetch;
mod run;

pub use fetch::FetchArgs;
pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cryptoml-signals")]
#[command(about = "Streak-tracking buy signals from the CryptoML prediction service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll predictions and report markets on a buy streak
    Run(RunArgs),
    /// Fetch and print one prediction response
    Fetch(FetchArgs),
    /// Show configuration
    Config,
}

/// Threshold override from the command line, or the configured value
pub fn resolve_threshold(cli: Option<f64>, configured: f64) -> anyhow::Result<f64> {
    let threshold = cli.unwrap_or(configured);
    if !threshold.is_finite() {
        anyhow::bail!("threshold must be a finite number, got {}", threshold);
    }
    Ok(threshold)
}
