//! Prediction service types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

/// CryptoML API base URL
pub const CRYPTOML_API_URL: &str = "https://cryptoml.azure-api.net";

/// Header carrying the subscription key
pub const API_KEY_HEADER: &str = "ocp-apim-subscription-key";

/// Endpoint shape of the prediction service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// `/prediction/threshold/{t}` with an empty JSON object body
    #[default]
    V1,
    /// `/v2/prediction/threshold/{t}` with no body
    V2,
}

impl ApiVersion {
    /// Full endpoint URL for a threshold
    pub fn endpoint_for(&self, base_url: &str, threshold: f64) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            ApiVersion::V1 => format!("{}/prediction/threshold/{}", base, threshold),
            ApiVersion::V2 => format!("{}/v2/prediction/threshold/{}", base, threshold),
        }
    }

    /// Request body, if this version sends one
    pub fn body(&self) -> Option<&'static str> {
        match self {
            ApiVersion::V1 => Some("{}"),
            ApiVersion::V2 => None,
        }
    }
}

/// A single prediction record for a coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted fractional return
    pub score: f64,
}

/// What the service said about one coin this cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SymbolPrediction {
    /// Non-empty record list, carrying the first record's score
    Positive(f64),
    /// Falsy value: `null`, `false`, `0`, `""`, `[]` or `{}`
    Negative,
    /// Truthy value without a numeric `score` on its first record
    Malformed,
}

impl SymbolPrediction {
    fn classify(value: &Value) -> Self {
        if !is_truthy(value) {
            return SymbolPrediction::Negative;
        }
        value
            .as_array()
            .and_then(|records| records.first())
            .and_then(|first| first.get("score"))
            .and_then(Value::as_f64)
            .map_or(SymbolPrediction::Malformed, SymbolPrediction::Positive)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Predictions keyed by coin symbol
///
/// Values are kept as received and only interpreted when a tracked coin
/// is looked up, so an odd value for an untracked coin never fails a
/// cycle. A symbol missing from the map means no prediction was made for
/// it this cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Predictions(HashMap<String, Value>);

impl Predictions {
    /// Empty prediction set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw response body
    ///
    /// The body must be a JSON object; anything else is a parse error.
    pub fn from_json(body: &str) -> Result<Self, PredictionError> {
        Ok(Self(serde_json::from_str(body)?))
    }

    /// Add or replace the records for a symbol
    pub fn insert(&mut self, symbol: impl Into<String>, records: Vec<Prediction>) {
        let records = records
            .into_iter()
            .map(|p| json!({ "score": p.score }))
            .collect();
        self.0.insert(symbol.into(), Value::Array(records));
    }

    /// Prediction for a symbol, `None` if the symbol is absent
    pub fn get(&self, symbol: &str) -> Option<SymbolPrediction> {
        self.0.get(symbol).map(SymbolPrediction::classify)
    }

    /// Number of symbols in the response
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Vec<Prediction>)> for Predictions {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Prediction>)>>(iter: I) -> Self {
        let mut predictions = Self::new();
        for (symbol, records) in iter {
            predictions.insert(symbol, records);
        }
        predictions
    }
}

/// Prediction fetch errors
#[derive(Debug, Error)]
pub enum PredictionError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Response body was not a valid prediction map
    #[error("Malformed prediction response: {0}")]
    Parse(#[from] serde_json::Error),
}
