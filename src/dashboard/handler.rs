//! Request handler behind the dashboard page.
//!
//! Each user interaction maps to exactly one call: `render` for a parameter
//! change, `download_config` / `upload_config` for the save buttons.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::params::DashboardParams;
use super::state::{DashboardState, Notice};
use super::view::DashboardView;
use crate::error::{DashboardError, Result};
use crate::metrics::Metrics;
use crate::models::controller::CONFIG_MIME_TYPE;
use crate::services::cache::CachedCandleSource;
use crate::services::config_store::ConfigStore;
use crate::services::market_data::CandleSource;
use crate::signals::engine::SignalEngine;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Config uploaded successfully!";
pub const DOCKER_NOT_RUNNING_MESSAGE: &str =
    "Docker is not running. Please make sure Docker is running.";

/// Downloadable controller config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

/// A saved config must carry the same values `render` would accept
fn validate_config_params(params: &DashboardParams) -> Result<()> {
    params.validate()?;
    params.macd_params().validate()?;
    Ok(())
}

pub struct Dashboard {
    candles: CachedCandleSource,
    config_store: Arc<dyn ConfigStore>,
    metrics: Option<Arc<Metrics>>,
}

impl Dashboard {
    pub fn new(
        candle_source: Arc<dyn CandleSource>,
        config_store: Arc<dyn ConfigStore>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            candles: CachedCandleSource::new(candle_source, cache_capacity),
            config_store,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.candles = self.candles.with_metrics(metrics.clone());
        self.metrics = Some(metrics);
        self
    }

    pub fn candle_cache(&self) -> &CachedCandleSource {
        &self.candles
    }

    /// Run one render cycle.
    ///
    /// An unreachable backend halts the cycle with an error notice; invalid
    /// parameters and empty candle sets are returned as errors.
    pub async fn render(&self, params: DashboardParams) -> Result<DashboardState> {
        if let Some(ref metrics) = self.metrics {
            metrics.dashboard_renders_total.inc();
        }

        params.validate()?;
        let macd_params = params.macd_params();
        macd_params.validate()?;

        let request = params.candle_request();
        let candles = match self.candles.fetch(&request).await {
            Ok(candles) => candles,
            Err(DashboardError::UpstreamUnavailable(reason)) => {
                error!(
                    connector = %request.connector,
                    trading_pair = %request.trading_pair,
                    error = %reason,
                    "Dashboard: candle fetch failed, halting render"
                );
                if let Some(ref metrics) = self.metrics {
                    metrics.upstream_errors_total.inc();
                }
                return Ok(DashboardState::halted(
                    params,
                    Notice::error(format!("Could not load candles: {}", reason)),
                ));
            }
            Err(e) => return Err(e),
        };

        let rows = SignalEngine::compute(&candles, &macd_params)?;
        let view = DashboardView::from_rows(rows);

        info!(
            connector = %request.connector,
            trading_pair = %request.trading_pair,
            interval = %request.interval,
            rows = view.summary.rows,
            long = view.summary.long,
            short = view.summary.short,
            "Dashboard: rendered {} rows",
            view.summary.rows
        );

        let mut state = DashboardState::new(params);
        if let Some(message) = macd_params.degenerate_warning() {
            state.notices.push(Notice::warning(message));
        }
        state.config = Some(state.params.controller_config());
        state.view = Some(view);
        Ok(state)
    }

    pub fn download_config(&self, params: &DashboardParams) -> Result<ConfigArtifact> {
        validate_config_params(params)?;
        let config = params.controller_config();
        Ok(ConfigArtifact {
            file_name: config.file_name(),
            mime_type: CONFIG_MIME_TYPE.to_string(),
            content: config.to_yaml()?,
        })
    }

    /// Upload the config to the remote store. Failures become error notices.
    pub async fn upload_config(&self, params: &DashboardParams) -> Notice {
        if let Err(e) = validate_config_params(params) {
            warn!(error = %e, "Dashboard: refusing to upload invalid config");
            return Notice::error(e.to_string());
        }
        let config = params.controller_config();

        match self.config_store.is_available().await {
            Ok(true) => {}
            Ok(false) => {
                warn!(config_id = %config.id, "Dashboard: backend reports Docker is not running");
                return Notice::error(DOCKER_NOT_RUNNING_MESSAGE);
            }
            Err(e) => {
                error!(config_id = %config.id, error = %e, "Dashboard: backend API unreachable");
                if let Some(ref metrics) = self.metrics {
                    metrics.upstream_errors_total.inc();
                }
                return Notice::error(format!(
                    "There was an error trying to connect to the Backend API: {}. Please make sure the Backend API is running.",
                    e
                ));
            }
        }

        match self.config_store.upload(&config).await {
            Ok(()) => {
                info!(config_id = %config.id, "Dashboard: controller config uploaded");
                if let Some(ref metrics) = self.metrics {
                    metrics.config_uploads_total.inc();
                }
                Notice::success(UPLOAD_SUCCESS_MESSAGE)
            }
            Err(e) => {
                error!(config_id = %config.id, error = %e, "Dashboard: config upload failed");
                if let Some(ref metrics) = self.metrics {
                    metrics.upstream_errors_total.inc();
                }
                Notice::error(format!("Config upload failed: {}", e))
            }
        }
    }
}
