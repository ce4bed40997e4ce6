//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::ema_series;
use crate::models::indicators::{Candle, MacdIndicator};

/// Calculate MACD for every candle
///
/// MACD = EMA(fast) - EMA(slow) of the close
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Spans must already be validated as positive. One value is produced per
/// candle; the first rows are based on very little history.
pub fn calculate_macd_series(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Vec<MacdIndicator> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast = ema_series(&closes, fast_period as usize);
    let slow = ema_series(&closes, slow_period as usize);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_series(&macd, signal_period as usize);
    let period = (fast_period, slow_period, signal_period);

    macd.into_iter()
        .zip(signal)
        .map(|(macd, signal_line)| MacdIndicator {
            macd,
            signal: signal_line,
            histogram: macd - signal_line,
            period,
        })
        .collect()
}
