//! Controller configuration produced by the dashboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, Result};

pub const CONFIG_FILE_EXTENSION: &str = "yml";
pub const CONFIG_MIME_TYPE: &str = "text/yaml";

/// Candle intervals offered by the dashboard. Parsed through `FromStr` so an
/// unsupported label reports the accepted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CandleInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[default]
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
}

impl CandleInterval {
    pub const ALL: [CandleInterval; 5] = [
        CandleInterval::OneMinute,
        CandleInterval::ThreeMinutes,
        CandleInterval::FiveMinutes,
        CandleInterval::FifteenMinutes,
        CandleInterval::ThirtyMinutes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandleInterval::OneMinute => "1m",
            CandleInterval::ThreeMinutes => "3m",
            CandleInterval::FiveMinutes => "5m",
            CandleInterval::FifteenMinutes => "15m",
            CandleInterval::ThirtyMinutes => "30m",
        }
    }
}

impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandleInterval {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        CandleInterval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s.trim())
            .ok_or_else(|| {
                DashboardError::InvalidForm(format!(
                    "Unsupported candle interval '{}', expected one of 1m, 3m, 5m, 15m, 30m",
                    s
                ))
            })
    }
}

impl TryFrom<String> for CandleInterval {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Flat record saved by the dashboard. Write-only: nothing in the engine reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub id: String,
    pub connector_name: String,
    pub trading_pair: String,
    pub interval: CandleInterval,
    pub macd_fast: i64,
    pub macd_slow: i64,
    pub macd_signal: i64,
}

impl ControllerConfig {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Download file name: the lowercased id with the YAML extension
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id.to_lowercase(), CONFIG_FILE_EXTENSION)
    }
}

/// `<config_base>-<config_tag>`
pub fn compose_config_id(config_base: &str, config_tag: &str) -> String {
    format!("{}-{}", config_base, config_tag)
}

/// Default config base: `macd_bb_v1-<connector>-<base asset>`
pub fn default_config_base(connector_name: &str, trading_pair: &str) -> String {
    let base_asset = trading_pair.split('-').next().unwrap_or(trading_pair);
    format!("macd_bb_v1-{}-{}", connector_name, base_asset)
}
