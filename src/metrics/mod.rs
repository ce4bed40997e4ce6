//! Prometheus metrics for the dashboard service

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub dashboard_renders_total: IntCounter,
    pub candle_cache_hits_total: IntCounter,
    pub candle_cache_misses_total: IntCounter,
    pub upstream_errors_total: IntCounter,
    pub config_uploads_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let dashboard_renders_total = IntCounter::new(
            "dashboard_renders_total",
            "Number of dashboard render cycles",
        )?;
        let candle_cache_hits_total = IntCounter::new(
            "candle_cache_hits_total",
            "Candle requests served from the cache",
        )?;
        let candle_cache_misses_total = IntCounter::new(
            "candle_cache_misses_total",
            "Candle requests forwarded to the backend API",
        )?;
        let upstream_errors_total = IntCounter::new(
            "upstream_errors_total",
            "Backend API calls that failed",
        )?;
        let config_uploads_total = IntCounter::new(
            "config_uploads_total",
            "Controller configs uploaded to the backend API",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(dashboard_renders_total.clone()))?;
        registry.register(Box::new(candle_cache_hits_total.clone()))?;
        registry.register(Box::new(candle_cache_misses_total.clone()))?;
        registry.register(Box::new(upstream_errors_total.clone()))?;
        registry.register(Box::new(config_uploads_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            dashboard_renders_total,
            candle_cache_hits_total,
            candle_cache_misses_total,
            upstream_errors_total,
            config_uploads_total,
        })
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
