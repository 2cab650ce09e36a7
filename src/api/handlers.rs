//! API Handlers
//!
//! HTTP request handlers for each relay endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::cache::ImageStore;
use crate::config::Config;
use crate::error::{RelayError, Result};
use crate::models::{HealthResponse, StatsResponse};
use crate::relay::RelayService;
use crate::tasks::spawn_cache_writer;
use crate::upstream::{HttpCatSource, HttpStatusProbe};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe image cache
    pub cache: Arc<RwLock<ImageStore>>,
    /// Status lookup and image relay
    pub relay: RelayService,
}

impl AppState {
    /// Creates a new AppState around a relay service.
    pub fn new(relay: RelayService) -> Self {
        Self {
            cache: relay.cache().clone(),
            relay,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache, starts the cache writer, and wires the HTTP probe
    /// and image source over the shared `client`. Returns the writer's
    /// JoinHandle so it can be aborted on shutdown.
    pub fn from_config(config: &Config, client: reqwest::Client) -> (Self, JoinHandle<()>) {
        let cache = Arc::new(RwLock::new(ImageStore::new(config.cache_size_limit)));
        let (writer, writer_handle) =
            spawn_cache_writer(cache.clone(), config.cache_queue_capacity);

        let probe = Arc::new(HttpStatusProbe::new(client.clone()));
        let images = Arc::new(HttpCatSource::new(client, config.image_source_url.clone()));

        let relay = RelayService::new(probe, images, cache, writer);
        (Self::new(relay), writer_handle)
    }
}

/// Handler for GET /httpcat/:url
///
/// `url` arrives percent-decoded from the path segment. Answers with the
/// image for the status code the URL responds with. A segment that does not
/// decode to UTF-8 is answered with a problem payload like any failed probe.
pub async fn httpcat_handler(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(url) = path.map_err(|rejection| RelayError::InvalidTarget(rejection.body_text()))?;
    let bytes = state.relay.relay(&url).await?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
