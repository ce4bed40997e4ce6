//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and the dashboard flow.


use serde_json::{json, Value};
use std::sync::Arc;

use test_utils::{TestApiServer, UnreachableCandleSource};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "dman-dashboard");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/dashboard").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for metric in [
        "http_requests_total",
        "http_request_duration_seconds",
        "http_requests_in_flight",
        "dashboard_renders_total 1",
        "candle_cache_misses_total 1",
    ] {
        assert!(body.contains(metric), "Expected {} metric", metric);
    }
}

#[tokio::test]
async fn dashboard_renders_with_defaults() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/dashboard").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["params"]["connector_name"], "binance_perpetual");
    assert_eq!(body["params"]["interval"], "3m");
    assert_eq!(body["view"]["indicator_key"], "MACD_21_42_9");
    assert_eq!(body["view"]["summary"]["rows"], 300);
    assert_eq!(body["view"]["rows"][10]["signal"], 1);
    assert_eq!(body["view"]["rows"][0]["timestamp"], 1_700_000_000);
    assert_eq!(body["config"]["id"], "macd_bb_v1-binance_perpetual-WLD-1.1");
    assert_eq!(body["notices"], json!([]));
}

#[tokio::test]
async fn dashboard_accepts_query_parameters() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/dashboard")
        .add_query_param("interval", "15m")
        .add_query_param("macd_fast", "12")
        .add_query_param("macd_slow", "26")
        .add_query_param("macd_signal", "9")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["view"]["indicator_key"], "MACD_12_26_9");
    assert_eq!(body["config"]["interval"], "15m");
}

#[tokio::test]
async fn dashboard_rejects_non_positive_parameters() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/dashboard")
        .add_query_param("macd_slow", "-1")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("slow"));
}

#[tokio::test]
async fn dashboard_rejects_out_of_range_max_records() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/dashboard")
        .add_query_param("max_records", "50")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn dashboard_rejects_unknown_interval() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/dashboard")
        .add_query_param("interval", "2h")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("expected one of 1m, 3m, 5m, 15m, 30m"));
}

#[tokio::test]
async fn dashboard_reports_malformed_number_as_json() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/dashboard")
        .add_query_param("macd_fast", "abc")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("macd_fast"));
}

#[tokio::test]
async fn dashboard_halts_when_backend_is_down() {
    let app = TestApiServer::with_source(Arc::new(UnreachableCandleSource), true).await;
    let response = app.server.get("/api/dashboard").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert!(body["view"].is_null());
    assert_eq!(body["notices"][0]["level"], "error");
}

#[tokio::test]
async fn config_download_is_a_yaml_attachment() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/config/download")
        .add_query_param("config_tag", "2.0")
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "text/yaml");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"macd_bb_v1-binance_perpetual-wld-2.0.yml\""
    );
    assert!(response
        .text()
        .contains("id: macd_bb_v1-binance_perpetual-WLD-2.0"));
}

#[tokio::test]
async fn config_upload_reports_success() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/config/upload")
        .json(&json!({ "trading_pair": "BTC-USDT" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["level"], "success");
    assert_eq!(body["message"], "Config uploaded successfully!");

    let uploaded = app.config_store.uploaded.lock().unwrap();
    assert_eq!(uploaded.len(), 1);
    assert_eq!(uploaded[0].id, "macd_bb_v1-binance_perpetual-BTC-1.1");
}

#[tokio::test]
async fn config_upload_reports_docker_down() {
    let app = TestApiServer::with_source(
        Arc::new(test_utils::StaticCandleSource::rising(10)),
        false,
    )
    .await;
    let response = app
        .server
        .post("/api/config/upload")
        .json(&json!({}))
        .await;

    let body: Value = response.json();
    assert_eq!(body["level"], "error");
    assert_eq!(
        body["message"],
        "Docker is not running. Please make sure Docker is running."
    );
    assert!(app.config_store.uploaded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn config_download_rejects_non_positive_periods() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .get("/api/config/download")
        .add_query_param("macd_fast", "0")
        .add_query_param("macd_slow", "-3")
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("fast"));
}

#[tokio::test]
async fn config_upload_refuses_invalid_parameters() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/config/upload")
        .json(&json!({ "macd_fast": -5, "max_records": 5 }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["level"], "error");
    assert!(app.config_store.uploaded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn config_upload_rejects_malformed_body() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/config/upload")
        .json(&json!({ "macd_fast": "fast" }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}
