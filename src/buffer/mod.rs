//! Signal buffer module
//!
//! Tracks consecutive positive predictions per market and turns them into
//! actionable buy signals

mod entry;
mod signal_buffer;
mod types;

pub use entry::{SignalEntry, StreakState};
pub use signal_buffer::{coin_symbol, SignalBuffer, DEFAULT_PREFIX_LEN};
pub use types::{Signal, SignalSet, UpdateSummary};
