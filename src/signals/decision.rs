//! Long/short decision rule on the MACD histogram

use crate::models::signal::SignalDirection;

/// Classify one row.
///
/// Long when the histogram is positive and rising over the lookback, short
/// when it is negative and falling, neutral otherwise (including when the
/// difference is not yet defined).
pub fn classify(histogram: f64, histogram_diff: Option<f64>) -> SignalDirection {
    match histogram_diff {
        Some(diff) if histogram > 0.0 && diff > 0.0 => SignalDirection::Long,
        Some(diff) if histogram < 0.0 && diff < 0.0 => SignalDirection::Short,
        _ => SignalDirection::Neutral,
    }
}

/// `values[i] - values[i - lookback]`, `None` for the first `lookback` entries
pub fn lagged_diff(values: &[f64], lookback: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| i.checked_sub(lookback).map(|j| v - values[j]))
        .collect()
}
