//! Environment-driven configuration
//!
//! Values are read from the process environment (a `.env` file is loaded by
//! the binaries through `dotenvy`). Every setting has a default so the
//! dashboard can start against a local backend without any setup.

use std::env;
use std::time::Duration;
use url::Url;

use crate::error::{DashboardError, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_API_HOST: &str = "localhost";
pub const DEFAULT_BACKEND_API_PORT: u16 = 8000;
pub const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_CANDLE_CACHE_CAPACITY: usize = 32;

/// Current deployment environment (`ENVIRONMENT`), defaults to `sandbox`
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub backend_api_host: String,
    pub backend_api_port: u16,
    pub backend_timeout: Duration,
    pub candle_cache_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_api_host: DEFAULT_BACKEND_API_HOST.to_string(),
            backend_api_port: DEFAULT_BACKEND_API_PORT,
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECONDS),
            candle_cache_capacity: DEFAULT_CANDLE_CACHE_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", DEFAULT_PORT),
            backend_api_host: env::var("BACKEND_API_HOST")
                .unwrap_or_else(|_| DEFAULT_BACKEND_API_HOST.to_string()),
            backend_api_port: env_or("BACKEND_API_PORT", DEFAULT_BACKEND_API_PORT),
            backend_timeout: Duration::from_secs(env_or(
                "BACKEND_API_TIMEOUT_SECONDS",
                DEFAULT_BACKEND_TIMEOUT_SECONDS,
            )),
            candle_cache_capacity: env_or("CANDLE_CACHE_CAPACITY", DEFAULT_CANDLE_CACHE_CAPACITY)
                .max(1),
        }
    }

    /// Base URL of the backend API, e.g. `http://localhost:8000/`
    pub fn backend_base_url(&self) -> Result<Url> {
        let host = self.backend_api_host.trim_end_matches('/');
        let raw = if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}:{}/", host, self.backend_api_port)
        } else {
            format!("http://{}:{}/", host, self.backend_api_port)
        };
        Url::parse(&raw).map_err(|e| {
            DashboardError::Configuration(format!(
                "Invalid backend API address '{}': {}",
                raw, e
            ))
        })
    }
}
