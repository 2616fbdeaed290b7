//! Configuration types for cryptoml-signals

use crate::buffer::{SignalBuffer, DEFAULT_PREFIX_LEN};
use crate::prediction::{ApiVersion, PredictionClientConfig, CRYPTOML_API_URL};
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "CRYPTOML_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prediction: PredictionConfig,
    pub buffer: BufferConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Prediction service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    /// Base URL of the prediction API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Subscription key, falls back to `CRYPTOML_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Endpoint shape
    #[serde(default)]
    pub api_version: ApiVersion,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    CRYPTOML_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_version: ApiVersion::V1,
            timeout_secs: 10,
        }
    }
}

impl PredictionConfig {
    /// Configured key, or the `CRYPTOML_API_KEY` environment variable
    pub fn resolve_api_key(&self) -> anyhow::Result<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Ok(key.clone());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key: set prediction.api_key or {} environment variable",
                    API_KEY_ENV
                )
            })
    }

    /// Build the HTTP client configuration
    pub fn client_config(&self) -> anyhow::Result<PredictionClientConfig> {
        Ok(PredictionClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.resolve_api_key()?,
            api_version: self.api_version,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

/// Signal buffer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BufferConfig {
    /// Market identifiers to track
    pub markets: Vec<String>,

    /// Length of the exchange prefix stripped to get the coin symbol
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,

    /// Minimum predicted return sent to the service (0.025 = 2.5%)
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Streak length at which a signal counts as confirmed
    #[serde(default = "default_repeats")]
    pub repeats: usize,
}

fn default_prefix_len() -> usize {
    DEFAULT_PREFIX_LEN
}
fn default_threshold() -> f64 {
    0.025
}
fn default_repeats() -> usize {
    3
}

impl BufferConfig {
    /// Build an empty signal buffer for the configured markets
    pub fn build(&self) -> SignalBuffer {
        SignalBuffer::with_prefix_len(self.markets.iter().cloned(), self.prefix_len)
    }
}

/// Polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Seconds between prediction cycles
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    60
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the buffer or the service cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.buffer.markets.is_empty() {
            anyhow::bail!("buffer.markets must list at least one market");
        }
        if !self.buffer.threshold.is_finite() {
            anyhow::bail!("buffer.threshold must be a finite number");
        }
        if self.poll.interval_secs == 0 {
            anyhow::bail!("poll.interval_secs must be greater than zero");
        }
        Ok(())
    }
}
