//! Shared data models spanning the engine layers.

pub mod controller;
pub mod indicators;
pub mod signal;

pub use controller::{CandleInterval, ControllerConfig};
pub use indicators::{Candle, IndicatorRow, MacdIndicator};
pub use signal::{SignalDirection, SignalRow};
