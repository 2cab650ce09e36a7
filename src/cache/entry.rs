//! Cache Entry Module
//!
//! Defines the structure for individual cached images.

use bytes::Bytes;

use super::ENTRY_COST;

// == Image Entry ==
/// A cached image payload with its accounting cost.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    /// The image bytes as served by the image source
    pub bytes: Bytes,
    /// Cost charged against the store capacity
    pub cost: usize,
}

impl ImageEntry {
    // == Constructor ==
    /// Creates a new entry charged at the fixed [`ENTRY_COST`].
    pub fn new(bytes: Bytes) -> Self {
        Self {
            bytes,
            cost: ENTRY_COST,
        }
    }
}
