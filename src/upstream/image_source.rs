//! Image Source
//!
//! Downloads the image published for a status code.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::error::{RelayError, Result};

/// Serves one image per status code.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Downloads the full image for `code`.
    ///
    /// # Errors
    /// Returns [`RelayError::ImageSource`] on transport failure, a non-success
    /// status, or a truncated body.
    async fn fetch(&self, code: u16) -> Result<Bytes>;
}

/// [`ImageSource`] backed by an http.cat style endpoint: `{base}/{code}.jpg`.
#[derive(Debug, Clone)]
pub struct HttpCatSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Returns the image URL for `code`.
    pub fn image_url(&self, code: u16) -> String {
        format!("{}/{}.jpg", self.base_url, code)
    }
}

#[async_trait]
impl ImageSource for HttpCatSource {
    async fn fetch(&self, code: u16) -> Result<Bytes> {
        let url = self.image_url(code);
        debug!(url = %url, "Downloading image");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RelayError::ImageSource(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(RelayError::ImageSource(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| RelayError::ImageSource(format!("Failed to read body: {e}")))
    }
}
