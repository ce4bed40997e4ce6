use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC(V) bucket. Timestamps have seconds resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume: Option<f64>,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// MACD values of a single row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    /// (fast, slow, signal) spans the values were computed with
    pub period: (u32, u32, u32),
}

impl MacdIndicator {
    /// Column suffix in the `fast_slow_signal` form, e.g. `21_42_9`
    pub fn key(&self) -> String {
        let (fast, slow, signal) = self.period;
        format!("{}_{}_{}", fast, slow, signal)
    }
}

/// A candle augmented with its MACD values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub candle: Candle,
    pub macd: MacdIndicator,
}
