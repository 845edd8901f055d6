//! Cache Entry Module
//!
//! Defines the structure for individual cached responses.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A single cached upstream payload with its storage timestamp.
///
/// The payload is opaque JSON: the upstream shape is not controlled by this
/// system, so no schema is imposed on it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached response body
    pub payload: Value,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            stored_at: current_timestamp_ms(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived the given TTL.
    ///
    /// Boundary condition: an entry is valid only while
    /// `now - stored_at < ttl`, so it is expired the instant the full TTL
    /// has elapsed.
    pub fn is_expired(&self, ttl_seconds: u64) -> bool {
        current_timestamp_ms().saturating_sub(self.stored_at) >= ttl_seconds * 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"count": 1}));

        assert_eq!(entry.payload, json!({"count": 1}));
        assert!(!entry.is_expired(60));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(json!("payload"));

        assert!(!entry.is_expired(1));

        // Wait for the 1-second TTL to elapse
        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired(1));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry {
            payload: json!(null),
            stored_at: current_timestamp_ms(),
        };

        // A zero TTL means the entry is expired immediately
        assert!(entry.is_expired(0), "Entry should be expired at boundary");
    }
}
