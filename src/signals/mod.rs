//! Signal evaluation on top of the MACD histogram.

pub mod decision;
pub mod engine;

pub use decision::*;
pub use engine::{MacdParams, SignalEngine, ValidatedParams};
