//! Telemetry module
//!
//! Structured logging for the signal client

mod logging;

pub use logging::{init_logging, LogFormat};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;
    tracing::debug!(level = %config.log_level, format = ?config.log_format, "Logging initialized");
    Ok(())
}
