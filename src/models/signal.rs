use serde::{Deserialize, Serialize};

use super::indicators::IndicatorRow;

/// Three-valued trading signal, serialized as `1`, `0` or `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum SignalDirection {
    Long,
    Neutral,
    Short,
}

impl SignalDirection {
    pub fn value(self) -> i8 {
        match self {
            SignalDirection::Long => 1,
            SignalDirection::Neutral => 0,
            SignalDirection::Short => -1,
        }
    }
}

impl From<SignalDirection> for i8 {
    fn from(direction: SignalDirection) -> Self {
        direction.value()
    }
}

impl TryFrom<i8> for SignalDirection {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SignalDirection::Long),
            0 => Ok(SignalDirection::Neutral),
            -1 => Ok(SignalDirection::Short),
            other => Err(format!("signal must be -1, 0 or 1, got {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    #[serde(flatten)]
    pub indicator: IndicatorRow,
    /// `histogram[i] - histogram[i - diff_lookback]`, absent during the first rows
    pub histogram_diff: Option<f64>,
    pub signal: SignalDirection,
}

impl SignalRow {
    pub fn close(&self) -> f64 {
        self.indicator.candle.close
    }

    pub fn histogram(&self) -> f64 {
        self.indicator.macd.histogram
    }
}
