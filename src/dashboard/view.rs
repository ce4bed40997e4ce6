//! View model for the three aligned plots of the dashboard.
//!
//! Rendering is left to the front end; this only decides what is drawn where.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::signal::{SignalDirection, SignalRow};

pub const CHART_TITLE: &str = "MACD Histogram Strategy";

pub const INCREASING_COLOR: &str = "#2ECC71";
pub const DECREASING_COLOR: &str = "#E74C3C";
pub const HISTOGRAM_POSITIVE_COLOR: &str = "#32CD32";
pub const HISTOGRAM_NEGATIVE_COLOR: &str = "#FF6347";
pub const MACD_LINE_COLOR: &str = "orange";
pub const MACD_SIGNAL_COLOR: &str = "purple";
pub const BUY_SIGNAL_COLOR: &str = "#1E90FF";
pub const SELL_SIGNAL_COLOR: &str = "#FF0000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    /// Share of the figure height
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candlestick {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub signal: SignalDirection,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub title: String,
    pub panels: Vec<Panel>,
    pub candlesticks: Vec<Candlestick>,
    pub macd_line: Series,
    pub macd_signal: Series,
    pub histogram: Vec<Bar>,
    /// Long entries drawn on the price panel at the close
    pub buy_markers: Vec<Marker>,
    /// Short entries drawn on the price panel at the close
    pub sell_markers: Vec<Marker>,
    /// Every non-neutral row for the bottom panel
    pub signal_markers: Vec<Marker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalSummary {
    pub rows: usize,
    pub long: usize,
    pub short: usize,
    pub neutral: usize,
    pub last_signal: Option<SignalDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// `MACD_<fast>_<slow>_<signal>` style key of the computed columns
    pub indicator_key: String,
    pub summary: SignalSummary,
    pub chart: ChartView,
    pub rows: Vec<SignalRow>,
}

fn signal_color(signal: SignalDirection) -> &'static str {
    match signal {
        SignalDirection::Short => SELL_SIGNAL_COLOR,
        _ => BUY_SIGNAL_COLOR,
    }
}

fn series(rows: &[SignalRow], name: &str, color: &str, value: fn(&SignalRow) -> f64) -> Series {
    Series {
        name: name.to_string(),
        color: color.to_string(),
        points: rows
            .iter()
            .map(|row| Point {
                timestamp: row.indicator.candle.timestamp,
                value: value(row),
            })
            .collect(),
    }
}

fn markers(
    rows: &[SignalRow],
    include: fn(SignalDirection) -> bool,
    value: fn(&SignalRow) -> f64,
) -> Vec<Marker> {
    rows.iter()
        .filter(|row| include(row.signal))
        .map(|row| Marker {
            timestamp: row.indicator.candle.timestamp,
            value: value(row),
            signal: row.signal,
            color: signal_color(row.signal).to_string(),
        })
        .collect()
}

impl SignalSummary {
    pub fn from_rows(rows: &[SignalRow]) -> Self {
        let mut summary = SignalSummary {
            rows: rows.len(),
            last_signal: rows.last().map(|r| r.signal),
            ..Default::default()
        };
        for row in rows {
            match row.signal {
                SignalDirection::Long => summary.long += 1,
                SignalDirection::Short => summary.short += 1,
                SignalDirection::Neutral => summary.neutral += 1,
            }
        }
        summary
    }
}

impl ChartView {
    pub fn from_rows(rows: &[SignalRow]) -> Self {
        let candlesticks = rows
            .iter()
            .map(|row| {
                let c = &row.indicator.candle;
                Candlestick {
                    timestamp: c.timestamp,
                    open: c.open,
                    high: c.high,
                    low: c.low,
                    close: c.close,
                    color: if c.is_bullish() {
                        INCREASING_COLOR
                    } else {
                        DECREASING_COLOR
                    }
                    .to_string(),
                }
            })
            .collect();

        let histogram = rows
            .iter()
            .map(|row| Bar {
                timestamp: row.indicator.candle.timestamp,
                value: row.histogram(),
                color: if row.histogram() < 0.0 {
                    HISTOGRAM_NEGATIVE_COLOR
                } else {
                    HISTOGRAM_POSITIVE_COLOR
                }
                .to_string(),
            })
            .collect();

        Self {
            title: CHART_TITLE.to_string(),
            panels: vec![
                Panel {
                    title: "Candlestick".to_string(),
                    height: 0.5,
                },
                Panel {
                    title: "MACD Line and Histogram".to_string(),
                    height: 0.3,
                },
                Panel {
                    title: "Trading Signals".to_string(),
                    height: 0.2,
                },
            ],
            candlesticks,
            macd_line: series(rows, "MACD Line", MACD_LINE_COLOR, |r| r.indicator.macd.macd),
            macd_signal: series(rows, "MACD Signal", MACD_SIGNAL_COLOR, |r| {
                r.indicator.macd.signal
            }),
            histogram,
            buy_markers: markers(rows, |s| s == SignalDirection::Long, SignalRow::close),
            sell_markers: markers(rows, |s| s == SignalDirection::Short, SignalRow::close),
            signal_markers: markers(
                rows,
                |s| s != SignalDirection::Neutral,
                |r| f64::from(r.signal.value()),
            ),
        }
    }
}

impl DashboardView {
    pub fn from_rows(rows: Vec<SignalRow>) -> Self {
        let indicator_key = rows
            .first()
            .map(|r| format!("MACD_{}", r.indicator.macd.key()))
            .unwrap_or_default();
        Self {
            indicator_key,
            summary: SignalSummary::from_rows(&rows),
            chart: ChartView::from_rows(&rows),
            rows,
        }
    }
}
