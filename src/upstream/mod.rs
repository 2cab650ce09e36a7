//! Upstream Module
//!
//! Outbound HTTP collaborators of the relay.
//!
//! # Collaborators
//! - Status probe: HEAD request to the caller's URL
//! - Image source: GET `{base}/{code}.jpg`

mod image_source;
mod probe;

pub use image_source::{HttpCatSource, ImageSource};
pub use probe::{HttpStatusProbe, StatusProbe};
