//! Wire types of the backend API

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::controller::CandleInterval;
use crate::models::indicators::Candle;
use crate::services::market_data::CandleRequest;

/// Body of `POST /real-time-candles`
#[derive(Debug, Clone, Serialize)]
pub struct CandlesRequest<'a> {
    pub connector: &'a str,
    pub trading_pair: &'a str,
    pub interval: CandleInterval,
    pub max_records: u32,
}

impl<'a> From<&'a CandleRequest> for CandlesRequest<'a> {
    fn from(request: &'a CandleRequest) -> Self {
        Self {
            connector: &request.connector,
            trading_pair: &request.trading_pair,
            interval: request.interval,
            max_records: request.max_records,
        }
    }
}

/// One record of the candles response. Unknown fields (quote volume, trade
/// counts, taker volumes) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleRecord {
    /// Seconds since the epoch, possibly fractional
    pub timestamp: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl CandleRecord {
    pub fn into_candle(self) -> Option<Candle> {
        if !self.timestamp.is_finite() {
            return None;
        }
        let timestamp = DateTime::from_timestamp(self.timestamp.trunc() as i64, 0)?;
        let candle = Candle::new(self.open, self.high, self.low, self.close, timestamp);
        Some(match self.volume {
            Some(volume) => candle.with_volume(volume),
            None => candle,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerStatus {
    pub is_docker_running: bool,
}
