//! Remote store for controller configurations.

use crate::error::Result;
use crate::models::controller::ControllerConfig;

#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Whether the store is ready to accept configs
    async fn is_available(&self) -> Result<bool>;

    async fn upload(&self, config: &ControllerConfig) -> Result<()>;
}
