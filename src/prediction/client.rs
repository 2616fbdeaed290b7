//! HTTP client for the CryptoML prediction service
//!
//! Issues a single POST per cycle. Transport failures and any status other
//! than 200 OK are logged and reported as an empty prediction set; only a
//! malformed body is returned as an error.

use super::{
    ApiVersion, PredictionError, PredictionSource, Predictions, API_KEY_HEADER, CRYPTOML_API_URL,
};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Configuration for the prediction client
#[derive(Debug, Clone)]
pub struct PredictionClientConfig {
    /// Base URL for the prediction API
    pub base_url: String,
    /// Subscription key sent with every request
    pub api_key: String,
    /// Endpoint shape
    pub api_version: ApiVersion,
    /// Request timeout
    pub timeout: Duration,
}

impl PredictionClientConfig {
    /// Default endpoint settings for an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: CRYPTOML_API_URL.to_string(),
            api_key: api_key.into(),
            api_version: ApiVersion::V1,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the CryptoML prediction API
pub struct PredictionClient {
    config: PredictionClientConfig,
    client: Client,
}

impl PredictionClient {
    /// Create a new prediction client
    pub fn new(config: PredictionClientConfig) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PredictionError::Client)?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &PredictionClientConfig {
        &self.config
    }

    /// Fetch predictions above `threshold`
    pub async fn fetch_predictions(&self, threshold: f64) -> Result<Predictions, PredictionError> {
        let url = self
            .config
            .api_version
            .endpoint_for(&self.config.base_url, threshold);
        let body = self.config.api_version.body();

        tracing::debug!(
            url = %url,
            version = ?self.config.api_version,
            body = body.unwrap_or(""),
            "Requesting predictions"
        );

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.config.api_key);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Prediction request failed");
                return Ok(Predictions::new());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    url = %url,
                    status = %status,
                    error = %e,
                    "Failed to read prediction response"
                );
                return Ok(Predictions::new());
            }
        };

        if status != StatusCode::OK {
            tracing::error!(
                url = %url,
                status = %status,
                response = %text,
                "Non-200 response from prediction API"
            );
            return Ok(Predictions::new());
        }

        tracing::debug!(response = %text, "Prediction response received");

        Predictions::from_json(&text)
    }
}

#[async_trait]
impl PredictionSource for PredictionClient {
    async fn fetch(&self, threshold: f64) -> Result<Predictions, PredictionError> {
        self.fetch_predictions(threshold).await
    }
}
