//! Form state of the dashboard page

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::controller::{
    compose_config_id, default_config_base, CandleInterval, ControllerConfig,
};
use crate::services::market_data::{CandleRequest, MAX_MAX_RECORDS, MIN_MAX_RECORDS};
use crate::signals::engine::{
    MacdParams, DEFAULT_DIFF_LOOKBACK, DEFAULT_MACD_FAST, DEFAULT_MACD_SIGNAL, DEFAULT_MACD_SLOW,
};

pub const DEFAULT_CONNECTOR: &str = "binance_perpetual";
pub const DEFAULT_TRADING_PAIR: &str = "WLD-USDT";
pub const DEFAULT_MAX_RECORDS: u32 = 1000;
pub const DEFAULT_CONFIG_TAG: &str = "1.1";

/// Everything the user can set on the page. Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardParams {
    pub connector_name: String,
    pub trading_pair: String,
    pub interval: CandleInterval,
    pub max_records: u32,
    pub macd_fast: i64,
    pub macd_slow: i64,
    pub macd_signal: i64,
    pub diff_lookback: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_tag: Option<String>,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            connector_name: DEFAULT_CONNECTOR.to_string(),
            trading_pair: DEFAULT_TRADING_PAIR.to_string(),
            interval: CandleInterval::default(),
            max_records: DEFAULT_MAX_RECORDS,
            macd_fast: DEFAULT_MACD_FAST,
            macd_slow: DEFAULT_MACD_SLOW,
            macd_signal: DEFAULT_MACD_SIGNAL,
            diff_lookback: DEFAULT_DIFF_LOOKBACK,
            config_base: None,
            config_tag: None,
        }
    }
}

impl DashboardParams {
    /// Checks the fields the engine does not own
    pub fn validate(&self) -> Result<()> {
        if self.connector_name.trim().is_empty() {
            return Err(DashboardError::InvalidForm(
                "connector_name must not be empty".to_string(),
            ));
        }
        if self.trading_pair.trim().is_empty() {
            return Err(DashboardError::InvalidForm(
                "trading_pair must not be empty".to_string(),
            ));
        }
        if !(MIN_MAX_RECORDS..=MAX_MAX_RECORDS).contains(&self.max_records) {
            return Err(DashboardError::InvalidForm(format!(
                "max_records must be between {} and {}, got {}",
                MIN_MAX_RECORDS, MAX_MAX_RECORDS, self.max_records
            )));
        }
        Ok(())
    }

    pub fn candle_request(&self) -> CandleRequest {
        CandleRequest::new(
            self.connector_name.trim(),
            self.trading_pair.trim(),
            self.interval,
            self.max_records,
        )
    }

    pub fn macd_params(&self) -> MacdParams {
        MacdParams::new(
            self.macd_fast,
            self.macd_slow,
            self.macd_signal,
            self.diff_lookback,
        )
    }

    pub fn config_base(&self) -> String {
        match self.config_base.as_deref().map(str::trim) {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => default_config_base(self.connector_name.trim(), self.trading_pair.trim()),
        }
    }

    pub fn config_tag(&self) -> String {
        match self.config_tag.as_deref().map(str::trim) {
            Some(tag) if !tag.is_empty() => tag.to_string(),
            _ => DEFAULT_CONFIG_TAG.to_string(),
        }
    }

    pub fn config_id(&self) -> String {
        compose_config_id(&self.config_base(), &self.config_tag())
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            id: self.config_id(),
            connector_name: self.connector_name.trim().to_string(),
            trading_pair: self.trading_pair.trim().to_string(),
            interval: self.interval,
            macd_fast: self.macd_fast,
            macd_slow: self.macd_slow,
            macd_signal: self.macd_signal,
        }
    }
}
