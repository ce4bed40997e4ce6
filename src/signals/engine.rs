//! Indicator & signal engine: candles in, one `SignalRow` per candle out.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::indicators::momentum::calculate_macd_series;
use crate::models::indicators::{Candle, IndicatorRow};
use crate::models::signal::SignalRow;
use crate::signals::decision::{classify, lagged_diff};

pub const DEFAULT_MACD_FAST: i64 = 21;
pub const DEFAULT_MACD_SLOW: i64 = 42;
pub const DEFAULT_MACD_SIGNAL: i64 = 9;
pub const DEFAULT_DIFF_LOOKBACK: i64 = 5;

/// Raw engine parameters as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: i64,
    pub slow: i64,
    pub signal: i64,
    pub diff_lookback: i64,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: DEFAULT_MACD_FAST,
            slow: DEFAULT_MACD_SLOW,
            signal: DEFAULT_MACD_SIGNAL,
            diff_lookback: DEFAULT_DIFF_LOOKBACK,
        }
    }
}

/// Parameters that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedParams {
    pub fast: u32,
    pub slow: u32,
    pub signal: u32,
    pub diff_lookback: usize,
}

fn positive(name: &'static str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(DashboardError::InvalidParameter { name, value });
    }
    u32::try_from(value).map_err(|_| DashboardError::InvalidParameter { name, value })
}

impl MacdParams {
    pub fn new(fast: i64, slow: i64, signal: i64, diff_lookback: i64) -> Self {
        Self {
            fast,
            slow,
            signal,
            diff_lookback,
        }
    }

    pub fn validate(&self) -> Result<ValidatedParams> {
        Ok(ValidatedParams {
            fast: positive("fast", self.fast)?,
            slow: positive("slow", self.slow)?,
            signal: positive("signal_period", self.signal)?,
            diff_lookback: positive("diff_lookback", self.diff_lookback)? as usize,
        })
    }

    /// A fast span at or above the slow span makes the MACD line degenerate
    pub fn is_degenerate(&self) -> bool {
        self.fast >= self.slow
    }

    pub fn degenerate_warning(&self) -> Option<String> {
        self.is_degenerate().then(|| {
            format!(
                "MACD fast period ({}) is not below the slow period ({}); the MACD line is degenerate",
                self.fast, self.slow
            )
        })
    }
}

pub struct SignalEngine;

impl SignalEngine {
    /// Compute MACD and the long/short signal for every candle.
    ///
    /// Returns exactly `candles.len()` rows in input order. Fails with
    /// `InvalidParameter` for a non-positive span or lookback and with
    /// `EmptyInput` when there are no candles.
    pub fn compute(candles: &[Candle], params: &MacdParams) -> Result<Vec<SignalRow>> {
        let validated = params.validate()?;
        if candles.is_empty() {
            return Err(DashboardError::EmptyInput);
        }
        if let Some(message) = params.degenerate_warning() {
            warn!(fast = params.fast, slow = params.slow, "{}", message);
        }

        let macd = calculate_macd_series(
            candles,
            validated.fast,
            validated.slow,
            validated.signal,
        );
        let histogram: Vec<f64> = macd.iter().map(|m| m.histogram).collect();
        let diffs = lagged_diff(&histogram, validated.diff_lookback);

        let rows: Vec<SignalRow> = candles
            .iter()
            .zip(macd)
            .zip(diffs)
            .map(|((candle, macd), histogram_diff)| SignalRow {
                signal: classify(macd.histogram, histogram_diff),
                histogram_diff,
                indicator: IndicatorRow {
                    candle: candle.clone(),
                    macd,
                },
            })
            .collect();

        debug!(
            rows = rows.len(),
            fast = validated.fast,
            slow = validated.slow,
            signal = validated.signal,
            diff_lookback = validated.diff_lookback,
            "SignalEngine: computed {} rows",
            rows.len()
        );

        Ok(rows)
    }

    /// Same as `compute` with the parameters spelled out
    pub fn compute_with(
        candles: &[Candle],
        fast: i64,
        slow: i64,
        signal_period: i64,
        diff_lookback: i64,
    ) -> Result<Vec<SignalRow>> {
        Self::compute(
            candles,
            &MacdParams::new(fast, slow, signal_period, diff_lookback),
        )
    }
}
