//! Rolling buy-signal buffer

use super::{Signal, SignalEntry, SignalSet, UpdateSummary};
use crate::prediction::{PredictionError, PredictionSource, Predictions, SymbolPrediction};
use chrono::Utc;
use std::collections::HashMap;

/// Length of the exchange prefix on market identifiers (e.g. "USDT" in "USDTBTC")
pub const DEFAULT_PREFIX_LEN: usize = 4;

/// Coin symbol of a market, `None` if the identifier is too short
pub fn coin_symbol(market: &str, prefix_len: usize) -> Option<&str> {
    market.get(prefix_len..).filter(|s| !s.is_empty())
}

/// Tracks buy streaks for a fixed set of markets
pub struct SignalBuffer {
    /// Tracked markets in configuration order
    markets: Vec<String>,
    prefix_len: usize,
    entries: HashMap<String, SignalEntry>,
}

impl SignalBuffer {
    /// Create a buffer with the default prefix length
    pub fn new<I, S>(markets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_prefix_len(markets, DEFAULT_PREFIX_LEN)
    }

    /// Create a buffer with a custom exchange prefix length
    pub fn with_prefix_len<I, S>(markets: I, prefix_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracked: Vec<String> = Vec::new();
        for market in markets {
            let market = market.into();
            if !tracked.contains(&market) {
                tracked.push(market);
            }
        }

        let mut buffer = Self {
            markets: tracked,
            prefix_len,
            entries: HashMap::new(),
        };
        buffer.reset();
        buffer
    }

    /// Zero every market's streak
    pub fn reset(&mut self) {
        tracing::debug!(markets = self.markets.len(), "Resetting signal buffer");
        self.entries = self
            .markets
            .iter()
            .map(|m| (m.clone(), SignalEntry::new()))
            .collect();
    }

    pub fn markets(&self) -> &[String] {
        &self.markets
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Current entry for a market
    pub fn entry(&self, market: &str) -> Option<&SignalEntry> {
        self.entries.get(market)
    }

    /// Entries in configuration order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &SignalEntry)> {
        self.markets
            .iter()
            .filter_map(|m| self.entries.get(m).map(|e| (m.as_str(), e)))
    }

    /// Apply one cycle of predictions
    ///
    /// A positive prediction extends the market's streak with the first
    /// record's score. A falsy value collapses the streak. A symbol missing
    /// from `predictions`, or one whose value carries no usable score, leaves
    /// the market untouched.
    pub fn update(&mut self, predictions: &Predictions) -> UpdateSummary {
        let mut summary = UpdateSummary::default();

        for market in &self.markets {
            let prediction = coin_symbol(market, self.prefix_len).and_then(|c| predictions.get(c));
            let Some(prediction) = prediction else {
                summary.untouched += 1;
                continue;
            };
            let Some(entry) = self.entries.get_mut(market) else {
                continue;
            };

            match prediction {
                SymbolPrediction::Positive(score) => {
                    entry.record(score);
                    summary.advanced += 1;
                }
                SymbolPrediction::Negative => {
                    entry.clear();
                    summary.reset += 1;
                }
                SymbolPrediction::Malformed => {
                    tracing::warn!(market = %market, "Prediction without a usable score, skipping");
                    summary.malformed += 1;
                }
            }
        }

        tracing::debug!(
            advanced = summary.advanced,
            reset = summary.reset,
            untouched = summary.untouched,
            malformed = summary.malformed,
            "Signal buffer updated"
        );

        summary
    }

    /// Snapshot of the buffer split into streaking and idle markets
    pub fn snapshot(&self, predictions: usize) -> SignalSet {
        let mut signals = Vec::new();
        let mut idle = Vec::new();

        for (market, entry) in self.entries() {
            if entry.is_idle() {
                idle.push(market.to_string());
            } else {
                signals.push(Signal {
                    market: market.to_string(),
                    entry: entry.clone(),
                });
            }
        }

        SignalSet {
            predictions,
            signals,
            idle,
            generated_at: Utc::now(),
        }
    }

    /// Fetch predictions, update the buffer and return the markets on a streak
    ///
    /// A malformed response is returned as an error and leaves the buffer
    /// unchanged.
    pub async fn get_signals<S>(
        &mut self,
        source: &S,
        threshold: f64,
    ) -> Result<SignalSet, PredictionError>
    where
        S: PredictionSource + ?Sized,
    {
        let predictions = source.fetch(threshold).await?;
        self.update(&predictions);

        let set = self.snapshot(predictions.len());

        tracing::debug!(idle = ?set.idle, "Markets without a streak");
        tracing::info!(
            predictions = set.predictions,
            actionable = set.signals.len(),
            signals = %serde_json::to_string(&set.signals).unwrap_or_default(),
            "CryptoML cycle complete"
        );

        Ok(set)
    }
}
