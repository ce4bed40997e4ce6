//! Dashboard API Server
//!
//! Serves the MACD dashboard: candle fetch, indicator/signal computation and
//! controller config download/upload.

use dman::config::{get_environment, AppConfig};
use dman::core::http::start_server;
use dman::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env();
    let port = config.port;

    info!("Starting dashboard server");
    info!(environment = %get_environment(), "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(
        backend_host = %config.backend_api_host,
        backend_port = config.backend_api_port,
        cache_capacity = config.candle_cache_capacity,
        "Backend API"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down dashboard server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
