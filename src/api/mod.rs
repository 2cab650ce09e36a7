//! API Module
//!
//! HTTP handlers and routing for the relay.
//!
//! # Endpoints
//! - `GET /httpcat/:url` - Image for the status code `url` answers with
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
