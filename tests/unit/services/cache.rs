//! Unit tests for the candle cache

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use dman::error::{DashboardError, Result};
use dman::models::controller::CandleInterval;
use dman::models::indicators::Candle;
use dman::services::cache::CachedCandleSource;
use dman::services::market_data::{CandleRequest, CandleSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

struct CountingSource {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingSource {
    fn new(fail: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandleSource for CountingSource {
    async fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DashboardError::UpstreamUnavailable("connection refused".to_string()));
        }
        let timestamp = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        Ok(vec![Candle::new(1.0, 1.0, 1.0, request.max_records as f64, timestamp)])
    }
}

fn request(pair: &str, max_records: u32) -> CandleRequest {
    CandleRequest::new("binance_perpetual", pair, CandleInterval::ThreeMinutes, max_records)
}

#[tokio::test]
async fn identical_requests_hit_upstream_once() {
    let source = Arc::new(CountingSource::new(false));
    let cache = CachedCandleSource::new(source.clone(), 4);

    let first = cache.fetch(&request("WLD-USDT", 1000)).await.unwrap();
    let second = cache.fetch(&request("WLD-USDT", 1000)).await.unwrap();

    assert_eq!(source.calls(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn every_key_field_separates_entries() {
    let source = Arc::new(CountingSource::new(false));
    let cache = CachedCandleSource::new(source.clone(), 8);

    cache.fetch(&request("WLD-USDT", 1000)).await.unwrap();
    cache.fetch(&request("WLD-USDT", 500)).await.unwrap();
    cache.fetch(&request("BTC-USDT", 1000)).await.unwrap();
    cache
        .fetch(&CandleRequest::new("binance", "WLD-USDT", CandleInterval::ThreeMinutes, 1000))
        .await
        .unwrap();
    cache
        .fetch(&CandleRequest::new(
            "binance_perpetual",
            "WLD-USDT",
            CandleInterval::OneMinute,
            1000,
        ))
        .await
        .unwrap();

    assert_eq!(source.calls(), 5);
    assert_eq!(cache.len().await, 5);
}

#[tokio::test]
async fn capacity_is_bounded() {
    let source = Arc::new(CountingSource::new(false));
    let cache = CachedCandleSource::new(source.clone(), 2);

    cache.fetch(&request("A-USDT", 100)).await.unwrap();
    cache.fetch(&request("B-USDT", 100)).await.unwrap();
    cache.fetch(&request("C-USDT", 100)).await.unwrap();
    assert_eq!(cache.len().await, 2);

    // A was evicted and must be fetched again
    cache.fetch(&request("A-USDT", 100)).await.unwrap();
    assert_eq!(source.calls(), 4);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let source = Arc::new(CountingSource::new(true));
    let cache = CachedCandleSource::new(source.clone(), 2);

    assert_err!(cache.fetch(&request("WLD-USDT", 1000)).await);
    assert_err!(cache.fetch(&request("WLD-USDT", 1000)).await);
    assert_eq!(source.calls(), 2);
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn invalidate_clears_entries() {
    let source = Arc::new(CountingSource::new(false));
    let cache = CachedCandleSource::new(source.clone(), 2);
    cache.fetch(&request("WLD-USDT", 1000)).await.unwrap();
    cache.invalidate().await;
    assert_ok!(cache.fetch(&request("WLD-USDT", 1000)).await);
    assert_eq!(source.calls(), 2);
}
