//! Signal output types

use super::SignalEntry;
use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A market currently on a buy streak
///
/// Serializes as `{"<market>": {buy_count, predicted_returns, running_return}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Market identifier as configured
    pub market: String,
    /// Snapshot of the market's streak
    pub entry: SignalEntry,
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.market, &self.entry)?;
        map.end()
    }
}

impl Signal {
    pub fn buy_count(&self) -> usize {
        self.entry.buy_count()
    }

    pub fn running_return(&self) -> f64 {
        self.entry.running_return()
    }
}

/// Result of one signal cycle
#[derive(Debug, Clone, Serialize)]
pub struct SignalSet {
    /// Number of coin symbols in the prediction response
    pub predictions: usize,
    /// Markets with a non-zero streak, in configuration order
    pub signals: Vec<Signal>,
    /// Markets with no streak, in configuration order
    pub idle: Vec<String>,
    /// Cycle timestamp
    pub generated_at: DateTime<Utc>,
}

impl SignalSet {
    /// Signals whose streak has lasted at least `repeats` cycles
    pub fn confirmed(&self, repeats: usize) -> Vec<&Signal> {
        self.signals
            .iter()
            .filter(|s| s.buy_count() >= repeats)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Per-cycle transition counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    /// Markets whose streak grew
    pub advanced: usize,
    /// Markets whose streak collapsed to zero
    pub reset: usize,
    /// Markets absent from the response
    pub untouched: usize,
    /// Markets whose value had no usable score
    pub malformed: usize,
}
