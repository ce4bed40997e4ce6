//! Error taxonomy shared by the engine, the backend client and the dashboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// A numeric engine parameter was zero or negative
    #[error("Invalid parameter `{name}`: {value} (must be a positive integer)")]
    InvalidParameter { name: &'static str, value: i64 },

    #[error("Candle sequence is empty, the EMA is undefined")]
    EmptyInput,

    /// Candle or config service could not be reached or answered with an error
    #[error("Backend API unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Invalid form input: {0}")]
    InvalidForm(String),

    /// Server-side settings (environment) are unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config serialization error: {source}")]
    ConfigSerialization {
        #[from]
        source: serde_yaml::Error,
    },
}

impl DashboardError {
    /// Errors caused by the caller's parameters rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidParameter { .. }
                | DashboardError::EmptyInput
                | DashboardError::InvalidForm(_)
        )
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::UpstreamUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
