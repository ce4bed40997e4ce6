//! Backend API integration: candle source and controller config store.

pub mod client;
pub mod messages;

pub use client::BackendApiClient;
