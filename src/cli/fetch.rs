//! Fetch command implementation

use super::resolve_threshold;
use crate::config::Config;
use crate::prediction::PredictionClient;
use clap::Args;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Override the configured threshold
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl FetchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let threshold = resolve_threshold(self.threshold, config.buffer.threshold)?;
        let client = PredictionClient::new(config.prediction.client_config()?)?;

        let predictions = client.fetch_predictions(threshold).await?;
        tracing::info!(
            threshold,
            count = predictions.len(),
            symbols = ?predictions.symbols().collect::<Vec<_>>(),
            "Fetched predictions"
        );

        println!("{}", serde_json::to_string_pretty(&predictions)?);
        Ok(())
    }
}
