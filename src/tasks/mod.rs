//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the server.
//!
//! # Tasks
//! - Cache writer: applies deferred image inserts to the cache

mod writer;

pub use writer::{spawn_cache_writer, CacheWrite, CacheWriter};
