//! Prediction service module
//!
//! Fetches per-coin return predictions from the remote CryptoML service

mod client;
mod types;

pub use client::{PredictionClient, PredictionClientConfig};
pub use types::{
    ApiVersion, Prediction, PredictionError, Predictions, SymbolPrediction, API_KEY_HEADER,
    CRYPTOML_API_URL,
};

use async_trait::async_trait;

/// Trait for prediction source implementations
#[async_trait]
pub trait PredictionSource: Send + Sync {
    /// Fetch predictions for coins expected to return at least `threshold`
    async fn fetch(&self, threshold: f64) -> Result<Predictions, PredictionError>;
}
