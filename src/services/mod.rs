pub mod backend_api;
pub mod cache;
pub mod config_store;
pub mod market_data;

pub use backend_api::BackendApiClient;
pub use cache::{CachedCandleSource, LruCache};
pub use config_store::ConfigStore;
pub use market_data::{CandleRequest, CandleSource};
