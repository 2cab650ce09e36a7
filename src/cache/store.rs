//! Image Store Module
//!
//! Main cache engine: an unbounded `LruCache` whose eviction is driven by
//! aggregate entry cost instead of entry count.

use bytes::Bytes;
use lru::LruCache;

use crate::cache::{CacheStats, ImageEntry};

// == Insert Outcome ==
/// Result of offering an image to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The image was stored, after evicting `evicted` older entries
    Inserted { evicted: usize },
    /// An image for this code was already cached; it was kept as is
    AlreadyCached,
    /// The entry cost alone exceeds the store capacity
    Rejected,
}

// == Image Store ==
/// Status-code keyed image storage with LRU eviction under a cost cap.
#[derive(Debug)]
pub struct ImageStore {
    /// Entries in recency order; capacity is enforced by cost, not length
    entries: LruCache<u16, ImageEntry>,
    stats: CacheStats,
    /// Maximum aggregate cost
    capacity: usize,
    /// Aggregate cost of the current entries
    used: usize,
}

impl ImageStore {
    // == Constructor ==
    /// Creates a new store bounded by `capacity` cost units.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            stats: CacheStats::new(capacity),
            capacity,
            used: 0,
        }
    }

    // == Get ==
    /// Looks up the image cached for `code`.
    ///
    /// A hit refreshes the entry's recency. Hits and misses are both counted.
    pub fn get(&mut self, code: u16) -> Option<Bytes> {
        match self.entries.get(&code) {
            Some(entry) => {
                let bytes = entry.bytes.clone();
                self.stats.record_hit();
                Some(bytes)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores the image fetched for `code`.
    ///
    /// Entries are never replaced: if `code` is already cached the existing
    /// bytes are kept and only their recency is refreshed. Least recently
    /// used entries are evicted until the new entry fits.
    pub fn insert(&mut self, code: u16, bytes: Bytes) -> InsertOutcome {
        if self.entries.contains(&code) {
            self.entries.promote(&code);
            return InsertOutcome::AlreadyCached;
        }

        let entry = ImageEntry::new(bytes);
        if entry.cost > self.capacity {
            return InsertOutcome::Rejected;
        }

        let mut evicted = 0;
        while self.used + entry.cost > self.capacity {
            let Some((_, old)) = self.entries.pop_lru() else {
                break;
            };
            self.used -= old.cost;
            self.stats.record_eviction();
            evicted += 1;
        }

        self.used += entry.cost;
        self.entries.put(code, entry);
        self.stats.set_occupancy(self.entries.len(), self.used);

        InsertOutcome::Inserted { evicted }
    }

    /// Returns true if an image for `code` is cached, without touching stats
    /// or recency.
    pub fn contains(&self, code: u16) -> bool {
        self.entries.contains(&code)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.entries.len(), self.used);
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the aggregate cost of the cached entries.
    pub fn total_cost(&self) -> usize {
        self.used
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ENTRY_COST;

    fn jpeg(tag: &'static [u8]) -> Bytes {
        Bytes::from_static(tag)
    }

    #[test]
    fn test_store_new() {
        let store = ImageStore::new(10 * ENTRY_COST);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.total_cost(), 0);
        assert_eq!(store.capacity(), 10 * ENTRY_COST);
    }

    #[test]
    fn test_store_insert_and_get() {
        let mut store = ImageStore::new(10 * ENTRY_COST);

        let outcome = store.insert(404, jpeg(b"not-found-cat"));
        assert_eq!(outcome, InsertOutcome::Inserted { evicted: 0 });

        assert_eq!(store.get(404), Some(jpeg(b"not-found-cat")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_cost(), ENTRY_COST);
    }

    #[test]
    fn test_store_get_missing() {
        let mut store = ImageStore::new(10 * ENTRY_COST);
        assert_eq!(store.get(500), None);
    }

    #[test]
    fn test_store_insert_keeps_existing_bytes() {
        let mut store = ImageStore::new(10 * ENTRY_COST);

        store.insert(200, jpeg(b"first"));
        let outcome = store.insert(200, jpeg(b"second"));

        assert_eq!(outcome, InsertOutcome::AlreadyCached);
        assert_eq!(store.get(200), Some(jpeg(b"first")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_cost(), ENTRY_COST);
    }

    #[test]
    fn test_store_accepts_out_of_range_codes() {
        let mut store = ImageStore::new(10 * ENTRY_COST);

        store.insert(999, jpeg(b"odd"));
        store.insert(0, jpeg(b"zero"));

        assert!(store.contains(999));
        assert!(store.contains(0));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = ImageStore::new(3 * ENTRY_COST);

        store.insert(200, jpeg(b"a"));
        store.insert(301, jpeg(b"b"));
        store.insert(404, jpeg(b"c"));

        // Full: 418 pushes out 200, the oldest
        let outcome = store.insert(418, jpeg(b"d"));
        assert_eq!(outcome, InsertOutcome::Inserted { evicted: 1 });

        assert_eq!(store.len(), 3);
        assert!(!store.contains(200));
        assert!(store.contains(301));
        assert!(store.contains(404));
        assert!(store.contains(418));
        assert_eq!(store.total_cost(), 3 * ENTRY_COST);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = ImageStore::new(3 * ENTRY_COST);

        store.insert(200, jpeg(b"a"));
        store.insert(301, jpeg(b"b"));
        store.insert(404, jpeg(b"c"));

        store.get(200);

        store.insert(418, jpeg(b"d"));

        assert!(store.contains(200));
        assert!(!store.contains(301));
    }

    #[test]
    fn test_store_reinsert_refreshes_recency() {
        let mut store = ImageStore::new(3 * ENTRY_COST);

        store.insert(200, jpeg(b"a"));
        store.insert(301, jpeg(b"b"));
        store.insert(404, jpeg(b"c"));

        // A redundant write for 200 keeps it warm
        assert_eq!(store.insert(200, jpeg(b"a2")), InsertOutcome::AlreadyCached);
        store.insert(418, jpeg(b"d"));

        assert!(store.contains(200));
        assert!(!store.contains(301));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_capacity_not_multiple_of_cost() {
        let mut store = ImageStore::new(2 * ENTRY_COST + 499);

        store.insert(200, jpeg(b"a"));
        store.insert(201, jpeg(b"b"));
        store.insert(202, jpeg(b"c"));

        assert_eq!(store.len(), 2);
        assert!(store.total_cost() <= store.capacity());
    }

    #[test]
    fn test_store_rejects_when_capacity_below_cost() {
        let mut store = ImageStore::new(ENTRY_COST - 1);

        assert_eq!(store.insert(200, jpeg(b"a")), InsertOutcome::Rejected);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_stats() {
        let mut store = ImageStore::new(3 * ENTRY_COST);

        store.insert(200, jpeg(b"a"));
        store.get(200);
        store.get(503);
        store.insert(201, jpeg(b"b"));
        store.insert(202, jpeg(b"c"));
        store.insert(203, jpeg(b"d"));

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_cost, 3 * ENTRY_COST);
        assert_eq!(stats.capacity, 3 * ENTRY_COST);
    }
}
