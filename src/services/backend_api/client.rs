//! HTTP client for the backend API (candles and controller configs)

use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::messages::{CandleRecord, CandlesRequest, DockerStatus};
use crate::config::AppConfig;
use crate::error::{DashboardError, Result};
use crate::models::controller::ControllerConfig;
use crate::models::indicators::Candle;
use crate::services::config_store::ConfigStore;
use crate::services::market_data::{CandleRequest, CandleSource};

const CANDLES_ENDPOINT: &str = "real-time-candles";
const ADD_CONTROLLER_CONFIG_ENDPOINT: &str = "add-controller-config";
const DOCKER_STATUS_ENDPOINT: &str = "is-docker-running";
const DEFAULT_MAX_RETRIES: usize = 2;

pub struct BackendApiClient {
    base_url: Url,
    client: reqwest::Client,
    backoff: ExponentialBuilder,
}

impl BackendApiClient {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()?;
        Ok(Self::with_client(config.backend_base_url()?, client))
    }

    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self {
            base_url,
            client,
            backoff: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(200))
                .with_max_times(DEFAULT_MAX_RETRIES),
        }
    }

    /// Parse `base_url` (e.g. a mock server URI) and build a client around it
    pub fn with_base_url(base_url: &str, client: reqwest::Client) -> Result<Self> {
        let url = Url::parse(base_url).map_err(|e| {
            DashboardError::Configuration(format!(
                "Invalid backend API address '{}': {}",
                base_url, e
            ))
        })?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.backoff = self.backoff.with_max_times(retries);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            DashboardError::UpstreamUnavailable(format!("Invalid endpoint '{}': {}", path, e))
        })
    }

    async fn request_candles(
        &self,
        url: &Url,
        request: &CandleRequest,
    ) -> reqwest::Result<Vec<CandleRecord>> {
        self.client
            .post(url.clone())
            .json(&CandlesRequest::from(request))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<CandleRecord>>()
            .await
    }

    pub async fn get_real_time_candles(&self, request: &CandleRequest) -> Result<Vec<Candle>> {
        let url = self.endpoint(CANDLES_ENDPOINT)?;
        let records = (|| async { self.request_candles(&url, request).await })
            .retry(self.backoff)
            .when(is_transient)
            .notify(|err: &reqwest::Error, delay: Duration| {
                warn!(
                    connector = %request.connector,
                    trading_pair = %request.trading_pair,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "BackendApiClient: candle request failed, retrying"
                );
            })
            .await?;

        let received = records.len();
        let candles = normalize_candles(records);
        if candles.len() != received {
            warn!(
                received,
                kept = candles.len(),
                "BackendApiClient: dropped candle records with invalid or duplicate timestamps"
            );
        }

        debug!(
            connector = %request.connector,
            trading_pair = %request.trading_pair,
            interval = %request.interval,
            count = candles.len(),
            "BackendApiClient: fetched {} candles",
            candles.len()
        );
        Ok(candles)
    }

    pub async fn is_docker_running(&self) -> Result<bool> {
        let url = self.endpoint(DOCKER_STATUS_ENDPOINT)?;
        let status = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<DockerStatus>()
            .await?;
        Ok(status.is_docker_running)
    }

    pub async fn add_controller_config(&self, config: &ControllerConfig) -> Result<()> {
        let url = self.endpoint(ADD_CONTROLLER_CONFIG_ENDPOINT)?;
        self.client
            .post(url)
            .json(config)
            .send()
            .await?
            .error_for_status()?;
        debug!(config_id = %config.id, "BackendApiClient: controller config uploaded");
        Ok(())
    }
}

/// Connection failures, timeouts and 5xx answers may succeed on a later attempt
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect()
        || err.is_timeout()
        || err.status().is_some_and(|status| status.is_server_error())
}

/// Convert wire records to candles ordered by timestamp, keeping the last
/// record of any duplicated bucket.
fn normalize_candles(records: Vec<CandleRecord>) -> Vec<Candle> {
    let mut candles: Vec<Candle> = records
        .into_iter()
        .filter_map(CandleRecord::into_candle)
        .collect();
    // Stable sort keeps arrival order inside a bucket
    candles.sort_by_key(|c| c.timestamp);
    let mut deduped: Vec<Candle> = Vec::with_capacity(candles.len());
    for candle in candles {
        match deduped.last_mut() {
            Some(last) if last.timestamp == candle.timestamp => *last = candle,
            _ => deduped.push(candle),
        }
    }
    deduped
}

#[async_trait::async_trait]
impl CandleSource for BackendApiClient {
    async fn fetch(&self, request: &CandleRequest) -> Result<Vec<Candle>> {
        self.get_real_time_candles(request).await
    }
}

#[async_trait::async_trait]
impl ConfigStore for BackendApiClient {
    async fn is_available(&self) -> Result<bool> {
        self.is_docker_running().await
    }

    async fn upload(&self, config: &ControllerConfig) -> Result<()> {
        self.add_controller_config(config).await
    }
}
