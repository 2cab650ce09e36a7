//! Relay Service
//!
//! Resolves a target URL to its status code and answers with the image for
//! that code, from the cache when possible.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::ImageStore;
use crate::error::Result;
use crate::tasks::CacheWriter;
use crate::upstream::{ImageSource, StatusProbe};

/// Status lookup followed by a cached image fetch.
///
/// Concurrent misses on the same code are not deduplicated: each one fetches
/// and enqueues its own insert, and the store keeps the first.
#[derive(Clone)]
pub struct RelayService {
    probe: Arc<dyn StatusProbe>,
    images: Arc<dyn ImageSource>,
    cache: Arc<RwLock<ImageStore>>,
    writer: CacheWriter,
}

impl RelayService {
    pub fn new(
        probe: Arc<dyn StatusProbe>,
        images: Arc<dyn ImageSource>,
        cache: Arc<RwLock<ImageStore>>,
        writer: CacheWriter,
    ) -> Self {
        Self {
            probe,
            images,
            cache,
            writer,
        }
    }

    /// Returns the image for the status code `url` answers with.
    pub async fn relay(&self, url: &str) -> Result<Bytes> {
        let code = self.resolve(url).await?;
        self.image_for(code).await
    }

    /// Probes `url` and returns its status code.
    pub async fn resolve(&self, url: &str) -> Result<u16> {
        let code = self.probe.probe(url).await?;
        debug!(url = %url, code, "HTTP HEAD returned status code");
        Ok(code)
    }

    /// Returns the image for `code`.
    ///
    /// On a miss the image is fetched and returned right away; the cache
    /// insert is handed to the background writer and not awaited.
    pub async fn image_for(&self, code: u16) -> Result<Bytes> {
        // Write lock: a hit refreshes LRU recency
        let cached = self.cache.write().await.get(code);
        if let Some(bytes) = cached {
            debug!(code, "Cache hit");
            return Ok(bytes);
        }

        debug!(code, "Cache miss, querying a cat");
        let bytes = self.images.fetch(code).await?;

        self.writer.enqueue(code, bytes.clone());

        Ok(bytes)
    }

    pub fn cache(&self) -> &Arc<RwLock<ImageStore>> {
        &self.cache
    }
}
