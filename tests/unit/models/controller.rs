//! Unit tests for the controller config model

use dman::models::controller::{
    compose_config_id, default_config_base, CandleInterval, ControllerConfig,
};

fn config() -> ControllerConfig {
    ControllerConfig {
        id: "macd_bb_v1-binance_perpetual-WLD-1.1".to_string(),
        connector_name: "binance_perpetual".to_string(),
        trading_pair: "WLD-USDT".to_string(),
        interval: CandleInterval::ThreeMinutes,
        macd_fast: 21,
        macd_slow: 42,
        macd_signal: 9,
    }
}

#[test]
fn yaml_carries_every_field() {
    let yaml = config().to_yaml().unwrap();
    for line in [
        "id: macd_bb_v1-binance_perpetual-WLD-1.1",
        "connector_name: binance_perpetual",
        "trading_pair: WLD-USDT",
        "interval: 3m",
        "macd_fast: 21",
        "macd_slow: 42",
        "macd_signal: 9",
    ] {
        assert!(yaml.contains(line), "missing `{}` in:\n{}", line, yaml);
    }
}

#[test]
fn yaml_reads_back() {
    let yaml = config().to_yaml().unwrap();
    let parsed: ControllerConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, config());
}

#[test]
fn file_name_is_lowercased_id() {
    let mut config = config();
    config.id = "MyBase-V2".to_string();
    assert_eq!(config.file_name(), "mybase-v2.yml");
}

#[test]
fn config_id_composition() {
    assert_eq!(
        default_config_base("binance_perpetual", "WLD-USDT"),
        "macd_bb_v1-binance_perpetual-WLD"
    );
    assert_eq!(compose_config_id("base", "1.1"), "base-1.1");
    // A pair without a quote asset keeps the whole symbol
    assert_eq!(default_config_base("kucoin", "BTC"), "macd_bb_v1-kucoin-BTC");
}

#[test]
fn interval_parses_supported_values() {
    assert_eq!("1m".parse::<CandleInterval>().unwrap(), CandleInterval::OneMinute);
    assert_eq!("30m".parse::<CandleInterval>().unwrap(), CandleInterval::ThirtyMinutes);
    assert!("2h".parse::<CandleInterval>().is_err());
}

#[test]
fn interval_serializes_as_label() {
    assert_eq!(
        serde_json::to_string(&CandleInterval::FiveMinutes).unwrap(),
        "\"5m\""
    );
    let interval: CandleInterval = serde_json::from_str("\"15m\"").unwrap();
    assert_eq!(interval, CandleInterval::FifteenMinutes);
}

#[test]
fn unsupported_interval_lists_accepted_values() {
    let err = serde_json::from_str::<CandleInterval>("\"2h\"").unwrap_err();
    assert!(err.to_string().contains("expected one of 1m, 3m, 5m, 15m, 30m"));
}
