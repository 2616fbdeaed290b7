//! Integration tests for signal buffer cycles

use async_trait::async_trait;
use cryptoml_signals::buffer::{SignalBuffer, StreakState};
use cryptoml_signals::prediction::{PredictionError, PredictionSource, Predictions};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned response bodies, one per fetch
struct ScriptedSource {
    responses: Mutex<VecDeque<&'static str>>,
    thresholds: Mutex<Vec<f64>>,
}

impl ScriptedSource {
    fn new(responses: &[&'static str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().copied().collect()),
            thresholds: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PredictionSource for ScriptedSource {
    async fn fetch(&self, threshold: f64) -> Result<Predictions, PredictionError> {
        self.thresholds.lock().unwrap().push(threshold);
        match self.responses.lock().unwrap().pop_front() {
            Some(body) => Predictions::from_json(body),
            None => Ok(Predictions::new()),
        }
    }
}

#[tokio::test]
async fn test_streak_then_reset() {
    let source = ScriptedSource::new(&[
        r#"{"BTC":[{"score":0.03}]}"#,
        r#"{"BTC":[],"ETH":[{"score":0.01}]}"#,
    ]);
    let mut buffer = SignalBuffer::new(["USDTBTC", "USDTETH"]);

    let first = buffer.get_signals(&source, 0.025).await.unwrap();
    assert_eq!(first.predictions, 1);
    assert_eq!(first.signals.len(), 1);
    assert_eq!(first.signals[0].market, "USDTBTC");
    assert_eq!(first.signals[0].buy_count(), 1);
    assert_eq!(first.signals[0].running_return(), 0.03);
    assert_eq!(first.idle, vec!["USDTETH".to_string()]);

    let second = buffer.get_signals(&source, 0.025).await.unwrap();
    assert_eq!(second.predictions, 2);
    assert_eq!(second.signals.len(), 1);
    assert_eq!(second.signals[0].market, "USDTETH");
    assert_eq!(second.signals[0].running_return(), 0.01);

    let btc = buffer.entry("USDTBTC").unwrap();
    assert_eq!(btc.state(), StreakState::Idle);
    assert!(btc.predicted_returns().is_empty());
    assert_eq!(btc.running_return(), 0.0);

    assert_eq!(*source.thresholds.lock().unwrap(), vec![0.025, 0.025]);
}

#[tokio::test]
async fn test_three_cycle_running_mean() {
    let source = ScriptedSource::new(&[
        r#"{"BTC":[{"score":0.02}]}"#,
        r#"{"BTC":[{"score":0.04}]}"#,
        r#"{"BTC":[{"score":0.03}]}"#,
    ]);
    let mut buffer = SignalBuffer::new(["USDTBTC", "USDTETH"]);

    buffer.get_signals(&source, 0.025).await.unwrap();
    buffer.get_signals(&source, 0.025).await.unwrap();
    let set = buffer.get_signals(&source, 0.025).await.unwrap();

    let btc = &set.signals[0];
    assert_eq!(btc.buy_count(), 3);
    assert!((btc.running_return() - 0.03).abs() < 1e-12);
    assert_eq!(set.confirmed(3).len(), 1);
    assert!(set.confirmed(4).is_empty());
}

#[tokio::test]
async fn test_null_value_resets_like_empty_list() {
    let source = ScriptedSource::new(&[r#"{"BTC":[{"score":0.05}]}"#, r#"{"BTC":null}"#]);
    let mut buffer = SignalBuffer::new(["USDTBTC"]);

    buffer.get_signals(&source, 0.025).await.unwrap();
    let set = buffer.get_signals(&source, 0.025).await.unwrap();

    assert!(set.is_empty());
    assert_eq!(set.idle, vec!["USDTBTC".to_string()]);
}

#[tokio::test]
async fn test_signals_and_idle_cover_all_markets() {
    let source = ScriptedSource::new(&[
        r#"{"BTC":[{"score":0.03}],"XRP":[{"score":0.06}],"DOGE":[{"score":0.2}]}"#,
    ]);
    let markets = ["USDTBTC", "USDTETH", "USDTXRP", "USDTLTC"];
    let mut buffer = SignalBuffer::new(markets);

    let set = buffer.get_signals(&source, 0.025).await.unwrap();

    assert_eq!(set.predictions, 3);
    let mut all: Vec<String> = set.signals.iter().map(|s| s.market.clone()).collect();
    all.extend(set.idle.iter().cloned());
    all.sort();
    let mut expected: Vec<String> = markets.iter().map(|m| m.to_string()).collect();
    expected.sort();
    assert_eq!(all, expected);
    assert!(set.signals.iter().all(|s| s.buy_count() > 0));
}

#[tokio::test]
async fn test_reset_after_cycles() {
    let source = ScriptedSource::new(&[r#"{"BTC":[{"score":0.03}],"ETH":[{"score":0.02}]}"#]);
    let mut buffer = SignalBuffer::new(["USDTBTC", "USDTETH"]);
    buffer.get_signals(&source, 0.025).await.unwrap();

    buffer.reset();
    buffer.reset();

    let set = buffer.snapshot(0);
    assert!(set.signals.is_empty());
    assert_eq!(set.idle.len(), 2);
}

#[tokio::test]
async fn test_odd_values_do_not_fail_the_cycle() {
    let cases = [
        (r#"{"BTC":{},"ETH":[{"score":0.01}]}"#, 0),
        (r#"{"BTC":false,"ETH":[{"score":0.01}]}"#, 0),
        (r#"{"DOGE":"n/a","ETH":[{"score":0.01}]}"#, 1),
    ];

    for (body, btc_count) in cases {
        let source = ScriptedSource::new(&[r#"{"BTC":[{"score":0.02}]}"#, body]);
        let mut buffer = SignalBuffer::new(["USDTBTC", "USDTETH"]);

        buffer.get_signals(&source, 0.025).await.unwrap();
        let set = buffer.get_signals(&source, 0.025).await.unwrap();

        assert_eq!(buffer.entry("USDTBTC").unwrap().buy_count(), btc_count, "{}", body);
        assert_eq!(buffer.entry("USDTETH").unwrap().buy_count(), 1, "{}", body);
        assert_eq!(set.signals.len(), 1 + btc_count, "{}", body);
    }
}
