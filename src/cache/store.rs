//! Cache Store Module
//!
//! The TTL response cache: a string-keyed map of upstream payloads with
//! lazy, access-time expiry.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, CategoryBreakdown};

// == Response Cache ==
/// String-keyed store of upstream response payloads.
///
/// Shared across requests behind `Arc<RwLock<_>>` via application state.
/// `get` takes `&mut self` because discovering an expired entry removes it;
/// the check-then-delete sequence is atomic under the enclosing lock.
#[derive(Debug)]
pub struct ResponseCache {
    /// Key-payload storage
    entries: HashMap<String, CacheEntry>,
    /// TTL in seconds applied to every entry
    ttl_seconds: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache with the given TTL.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_seconds,
        }
    }

    // == Get ==
    /// Retrieves the payload stored under `key`, if still valid.
    ///
    /// An entry whose TTL has elapsed is removed and reported as absent;
    /// expiry is discovered here, not by a background sweep.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(self.ttl_seconds) => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.payload.clone()),
            None => None,
        }
    }

    // == Put ==
    /// Stores `payload` under `key`, unconditionally overwriting any
    /// existing entry and resetting its timestamp.
    pub fn put(&mut self, key: impl Into<String>, payload: Value) {
        self.entries.insert(key.into(), CacheEntry::new(payload));
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns a snapshot of the stored keys classified by category.
    ///
    /// Expired-but-untouched entries are still counted; stats never trigger
    /// expiry.
    pub fn stats(&self) -> CacheStats {
        let mut categories = CategoryBreakdown::default();
        for key in self.entries.keys() {
            categories.record(key);
        }

        CacheStats {
            total_entries: self.entries.len(),
            ttl_seconds: self.ttl_seconds,
            categories,
        }
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
