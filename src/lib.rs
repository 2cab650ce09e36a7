//! HTTP Cat Relay - status code lookup answered with a cached cat
//!
//! Probes a URL with a HEAD request and responds with the http.cat image for
//! the status code it returned. Images are cached in memory under a cost cap
//! with LRU eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod relay;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use relay::RelayService;
