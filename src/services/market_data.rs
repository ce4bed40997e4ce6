//! Candle source interface.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::controller::CandleInterval;
use crate::models::indicators::Candle;

pub const MIN_MAX_RECORDS: u32 = 100;
pub const MAX_MAX_RECORDS: u32 = 10_000;

/// Everything that identifies a candle fetch; also the cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandleRequest {
    pub connector: String,
    pub trading_pair: String,
    pub interval: CandleInterval,
    pub max_records: u32,
}

impl CandleRequest {
    pub fn new(
        connector: impl Into<String>,
        trading_pair: impl Into<String>,
        interval: CandleInterval,
        max_records: u32,
    ) -> Self {
        Self {
            connector: connector.into(),
            trading_pair: trading_pair.into(),
            interval,
            max_records,
        }
    }
}

#[async_trait::async_trait]
pub trait CandleSource: Send + Sync {
    /// Ordered candles, oldest first. Fails with `UpstreamUnavailable`.
    async fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>>;
}
