//! Status Probe
//!
//! Resolves a target URL to the status code its server answers with.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{RelayError, Result};

/// Resolves a URL to a numeric HTTP status code.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    /// Probes `url` once and returns the reported status code.
    ///
    /// # Errors
    /// Returns [`RelayError::QueryFailed`] if the request cannot be built or
    /// does not complete.
    async fn probe(&self, url: &str) -> Result<u16>;
}

/// [`StatusProbe`] issuing a single HEAD request over a shared client.
#[derive(Debug, Clone)]
pub struct HttpStatusProbe {
    client: reqwest::Client,
}

impl HttpStatusProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusProbe for HttpStatusProbe {
    async fn probe(&self, url: &str) -> Result<u16> {
        debug!(url = %url, "Querying status code");

        // Only the status line is needed, so no body is downloaded
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|source| RelayError::QueryFailed {
                url: url.to_string(),
                source,
            })?;

        Ok(response.status().as_u16())
    }
}
