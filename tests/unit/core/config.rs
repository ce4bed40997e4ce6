//! Unit tests for application configuration

use dman::config::AppConfig;
use dman::error::DashboardError;
use std::time::Duration;

#[test]
fn defaults_point_at_local_backend() {
    let config = AppConfig::default();
    assert_eq!(config.port, 8080);
    assert_eq!(config.backend_timeout, Duration::from_secs(10));
    assert_eq!(config.candle_cache_capacity, 32);
    assert_eq!(
        config.backend_base_url().unwrap().as_str(),
        "http://localhost:8000/"
    );
}

#[test]
fn host_with_scheme_is_kept() {
    let config = AppConfig {
        backend_api_host: "https://backend.internal/".to_string(),
        backend_api_port: 443,
        ..Default::default()
    };
    // The default port of the scheme is elided by the URL parser
    assert_eq!(
        config.backend_base_url().unwrap().as_str(),
        "https://backend.internal/"
    );
}

#[test]
fn malformed_host_is_rejected() {
    let config = AppConfig {
        backend_api_host: "bad host".to_string(),
        ..Default::default()
    };
    let err = config.backend_base_url().unwrap_err();
    assert!(matches!(err, DashboardError::Configuration(_)));
    assert!(!err.is_client_error());
}
