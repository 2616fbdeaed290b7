//! End-to-end integration tests

use cryptoml_signals::config::Config;
use cryptoml_signals::prediction::{ApiVersion, Prediction, Predictions};

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    config.validate().unwrap();

    assert_eq!(config.prediction.api_version, ApiVersion::V1);
    assert_eq!(config.buffer.prefix_len, 4);
    assert!(config.buffer.markets.contains(&"USDTBTC".to_string()));
}

#[test]
fn test_config_to_buffer_cycle() {
    let toml = r#"
        [buffer]
        markets = ["USDTBTC", "USDTETH"]
    "#;
    let config: Config = toml::from_str(toml).unwrap();
    let mut buffer = config.buffer.build();

    let mut predictions = Predictions::new();
    predictions.insert("BTC", vec![Prediction { score: 0.03 }]);
    let summary = buffer.update(&predictions);

    assert_eq!(summary.advanced, 1);
    assert_eq!(summary.untouched, 1);

    let set = buffer.snapshot(predictions.len());
    assert_eq!(set.signals.len(), 1);
    assert_eq!(set.signals[0].market, "USDTBTC");
    assert_eq!(set.idle, vec!["USDTETH".to_string()]);
}
