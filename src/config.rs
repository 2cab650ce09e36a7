//! Configuration Module
//!
//! Handles loading and managing relay configuration from environment variables.

use std::env;

use crate::cache::ENTRY_COST;

/// Default image endpoint, serving `{code}.jpg`
pub const DEFAULT_IMAGE_SOURCE_URL: &str = "https://http.cat";

/// Relay configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum aggregate cost of cached images, in cost units
    pub cache_size_limit: usize,
    /// Base URL of the image endpoint
    pub image_source_url: String,
    /// Maximum number of pending background cache writes
    pub cache_queue_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_SIZE_LIMIT` - Cache capacity in cost units, 500 per image (default: 50000)
    /// - `IMAGE_SOURCE_URL` - Image endpoint base URL (default: https://http.cat)
    /// - `CACHE_QUEUE_CAPACITY` - Pending cache write limit (default: 256)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cache_size_limit: env::var("CACHE_SIZE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_size_limit),
            image_source_url: env::var("IMAGE_SOURCE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.image_source_url),
            cache_queue_capacity: env::var("CACHE_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_queue_capacity),
        }
    }

    /// Number of images the cache can hold at the configured size limit.
    pub fn cache_slots(&self) -> usize {
        self.cache_size_limit / ENTRY_COST
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_size_limit: 100 * ENTRY_COST,
            image_source_url: DEFAULT_IMAGE_SOURCE_URL.to_string(),
            cache_queue_capacity: 256,
        }
    }
}
