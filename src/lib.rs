//! MACD dashboard service: candle fetch, indicator and signal computation,
//! controller config persistence.

pub mod config;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{DashboardError, Result};
