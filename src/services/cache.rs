//! Bounded, keyed memoisation of candle fetches

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::indicators::Candle;
use crate::services::market_data::{CandleRequest, CandleSource};

/// Least-recently-used map with a fixed capacity
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Clone + Eq + Hash, V: Clone> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        let value = self.entries.get(key)?.clone();
        self.touch(key);
        Some(value)
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.insert(key.clone(), value).is_some() {
            self.touch(&key);
            return;
        }
        self.order.push_back(key);
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

/// Candle source wrapper that answers repeated identical requests from memory.
/// Failed fetches are not cached.
pub struct CachedCandleSource {
    inner: Arc<dyn CandleSource>,
    cache: Mutex<LruCache<CandleRequest, Arc<Vec<Candle>>>>,
    metrics: Option<Arc<Metrics>>,
}

impl CachedCandleSource {
    pub fn new(inner: Arc<dyn CandleSource>, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn fetch(&self, request: &CandleRequest) -> Result<Arc<Vec<Candle>>> {
        if let Some(hit) = self.cache.lock().await.get(request) {
            debug!(
                connector = %request.connector,
                trading_pair = %request.trading_pair,
                interval = %request.interval,
                "CandleCache: hit"
            );
            if let Some(ref metrics) = self.metrics {
                metrics.candle_cache_hits_total.inc();
            }
            return Ok(hit);
        }

        if let Some(ref metrics) = self.metrics {
            metrics.candle_cache_misses_total.inc();
        }

        // The lock is not held across the upstream call
        let candles = Arc::new(self.inner.fetch(request).await?);
        self.cache
            .lock()
            .await
            .insert(request.clone(), candles.clone());
        Ok(candles)
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn invalidate(&self) {
        self.cache.lock().await.clear();
    }
}
