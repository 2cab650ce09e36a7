//! Cache Writer Task
//!
//! Background task that applies image inserts to the cache off the response
//! path. Handlers enqueue writes without waiting; the worker applies them
//! one at a time under the store's write lock.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{ImageStore, InsertOutcome};

/// A deferred insert of a freshly fetched image.
#[derive(Debug)]
pub struct CacheWrite {
    pub code: u16,
    pub bytes: Bytes,
}

/// Handle used by request handlers to enqueue cache writes.
#[derive(Debug, Clone)]
pub struct CacheWriter {
    sender: mpsc::Sender<CacheWrite>,
}

impl CacheWriter {
    /// Enqueues an insert for `code` without waiting.
    ///
    /// Returns false if the write was dropped because the queue is full or
    /// the worker has stopped. A dropped write only costs a later refetch.
    pub fn enqueue(&self, code: u16, bytes: Bytes) -> bool {
        match self.sender.try_send(CacheWrite { code, bytes }) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(write)) => {
                warn!(code = write.code, "Cache write queue full, dropping write");
                false
            }
            Err(mpsc::error::TrySendError::Closed(write)) => {
                warn!(code = write.code, "Cache writer stopped, dropping write");
                false
            }
        }
    }
}

/// Spawns the worker that drains the cache write queue.
///
/// # Arguments
/// * `cache` - Arc<RwLock<ImageStore>> shared reference to the cache
/// * `queue_capacity` - Maximum number of pending writes (at least 1)
///
/// # Returns
/// The writer handle for handlers, and a JoinHandle for the worker which can
/// be used to abort it during graceful shutdown.
pub fn spawn_cache_writer(
    cache: Arc<RwLock<ImageStore>>,
    queue_capacity: usize,
) -> (CacheWriter, JoinHandle<()>) {
    let queue_capacity = queue_capacity.max(1);
    let (sender, mut receiver) = mpsc::channel::<CacheWrite>(queue_capacity);

    let handle = tokio::spawn(async move {
        info!(queue_capacity, "Starting cache writer");

        while let Some(CacheWrite { code, bytes }) = receiver.recv().await {
            let outcome = cache.write().await.insert(code, bytes);

            match outcome {
                InsertOutcome::Inserted { evicted } => {
                    debug!(code, evicted, "Cached image");
                }
                InsertOutcome::AlreadyCached => {
                    debug!(code, "Image already cached, keeping existing entry");
                }
                InsertOutcome::Rejected => {
                    warn!(code, "Image cost exceeds cache capacity, not cached");
                }
            }
        }

        info!("Cache writer shutting down");
    });

    (CacheWriter { sender }, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ENTRY_COST;
    use std::time::Duration;

    async fn wait_for(cache: &Arc<RwLock<ImageStore>>, code: u16) -> bool {
        for _ in 0..100 {
            if cache.read().await.contains(code) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_writer_applies_insert() {
        let cache = Arc::new(RwLock::new(ImageStore::new(10 * ENTRY_COST)));
        let (writer, handle) = spawn_cache_writer(cache.clone(), 8);

        assert!(writer.enqueue(404, Bytes::from_static(b"cat")));
        assert!(wait_for(&cache, 404).await, "Write should reach the cache");

        assert_eq!(
            cache.write().await.get(404),
            Some(Bytes::from_static(b"cat"))
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_writer_duplicate_inserts_keep_one_entry() {
        let cache = Arc::new(RwLock::new(ImageStore::new(10 * ENTRY_COST)));
        let (writer, handle) = spawn_cache_writer(cache.clone(), 8);

        writer.enqueue(500, Bytes::from_static(b"first"));
        writer.enqueue(500, Bytes::from_static(b"second"));
        writer.enqueue(502, Bytes::from_static(b"other"));

        assert!(wait_for(&cache, 502).await);

        let mut store = cache.write().await;
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_cost(), 2 * ENTRY_COST);
        assert_eq!(store.get(500), Some(Bytes::from_static(b"first")));
        drop(store);

        handle.abort();
    }

    #[tokio::test]
    async fn test_enqueue_drops_when_queue_full() {
        let cache = Arc::new(RwLock::new(ImageStore::new(10 * ENTRY_COST)));
        let (writer, handle) = spawn_cache_writer(cache, 1);

        // Single-threaded test runtime: the worker cannot drain in between
        assert!(writer.enqueue(200, Bytes::from_static(b"a")));
        assert!(!writer.enqueue(201, Bytes::from_static(b"b")));

        handle.abort();
    }

    #[tokio::test]
    async fn test_enqueue_after_worker_stopped() {
        let cache = Arc::new(RwLock::new(ImageStore::new(10 * ENTRY_COST)));
        let (writer, handle) = spawn_cache_writer(cache, 4);

        handle.abort();
        let _ = handle.await;

        assert!(!writer.enqueue(200, Bytes::from_static(b"a")));
    }
}
