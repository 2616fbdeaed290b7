//! Run command implementation

use super::resolve_threshold;
use crate::buffer::{SignalBuffer, SignalSet};
use crate::config::Config;
use crate::prediction::{PredictionClient, PredictionSource};
use clap::Args;
use std::future::Future;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Override the configured threshold
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let threshold = resolve_threshold(self.threshold, config.buffer.threshold)?;
        let client = PredictionClient::new(config.prediction.client_config()?)?;
        let mut buffer = config.buffer.build();
        let repeats = config.buffer.repeats;

        tracing::info!(
            markets = buffer.markets().len(),
            threshold,
            version = ?config.prediction.api_version,
            "Starting signal loop"
        );

        if self.once {
            return run_cycle(&mut buffer, &client, threshold, repeats).await;
        }

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        let interval = Duration::from_secs(config.poll.interval_secs);
        run_loop(&mut buffer, &client, threshold, repeats, interval, shutdown).await;

        Ok(())
    }
}

/// Poll on `interval` until `shutdown` resolves
///
/// `shutdown` is polled before every tick, so a signal that arrives during
/// a slow cycle stops the loop once that cycle finishes.
async fn run_loop<S, F>(
    buffer: &mut SignalBuffer,
    source: &S,
    threshold: f64,
    repeats: usize,
    interval: Duration,
    shutdown: F,
) where
    S: PredictionSource + ?Sized,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!("Shutting down signal loop");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = run_cycle(buffer, source, threshold, repeats).await {
                    tracing::error!(error = %e, "Signal cycle failed");
                }
            }
        }
    }
}

/// One fetch/update/report cycle
async fn run_cycle<S: PredictionSource + ?Sized>(
    buffer: &mut SignalBuffer,
    source: &S,
    threshold: f64,
    repeats: usize,
) -> anyhow::Result<()> {
    let set = buffer.get_signals(source, threshold).await?;
    report(&set, repeats)
}

fn report(set: &SignalSet, repeats: usize) -> anyhow::Result<()> {
    let confirmed = set.confirmed(repeats);
    if !confirmed.is_empty() {
        tracing::info!(
            repeats,
            markets = ?confirmed.iter().map(|s| s.market.as_str()).collect::<Vec<_>>(),
            "Confirmed buy signals"
        );
    }
    println!("{}", serde_json::to_string_pretty(&set.signals)?);
    Ok(())
}
