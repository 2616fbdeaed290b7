//! Per-market streak state

use serde::Serialize;

/// Streak state of a single market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    /// No positive prediction in the current streak
    Idle,
    /// `n` consecutive cycles with a positive prediction
    Streak(usize),
}

/// Buy streak tracked for one market
///
/// `buy_count` always equals `predicted_returns.len()` and `running_return`
/// is their mean (0 when empty). Fields are only mutated through
/// [`SignalEntry::record`] and [`SignalEntry::clear`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalEntry {
    buy_count: usize,
    predicted_returns: Vec<f64>,
    running_return: f64,
}

impl SignalEntry {
    /// Zeroed entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the streak with a positive prediction
    pub fn record(&mut self, score: f64) {
        self.predicted_returns.push(score);
        self.buy_count = self.predicted_returns.len();
        self.running_return =
            self.predicted_returns.iter().sum::<f64>() / self.predicted_returns.len() as f64;
    }

    /// Collapse the streak
    pub fn clear(&mut self) {
        self.buy_count = 0;
        self.predicted_returns.clear();
        self.running_return = 0.0;
    }

    pub fn buy_count(&self) -> usize {
        self.buy_count
    }

    pub fn predicted_returns(&self) -> &[f64] {
        &self.predicted_returns
    }

    pub fn running_return(&self) -> f64 {
        self.running_return
    }

    pub fn is_idle(&self) -> bool {
        self.buy_count == 0
    }

    pub fn state(&self) -> StreakState {
        match self.buy_count {
            0 => StreakState::Idle,
            n => StreakState::Streak(n),
        }
    }
}
