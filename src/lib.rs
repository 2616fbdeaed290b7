//! cryptoml-signals: buy signal buffer for the CryptoML prediction service
//!
//! This library provides:
//! - A client for the CryptoML threshold prediction API (v1 and v2 endpoints)
//! - A per-market streak buffer that turns consecutive positive predictions
//!   into buy signals with a running average predicted return
//! - Configuration, CLI and structured logging for a polling client

pub mod buffer;
pub mod cli;
pub mod config;
pub mod prediction;
pub mod telemetry;
