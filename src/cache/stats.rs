//! Cache Statistics Module
//!
//! Snapshot of the cache contents: total entry count, configured TTL, and a
//! breakdown of stored keys by category.

use serde::Serialize;

use crate::cache::CacheCategory;

// == Category Breakdown ==
/// Per-category key counts.
///
/// Counts reflect what is currently stored, including entries whose TTL has
/// already elapsed but which have not yet been touched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryBreakdown {
    pub pokemon_list: usize,
    pub pokemon_detail: usize,
    pub type_list: usize,
    pub type_detail: usize,
    pub other: usize,
}

impl CategoryBreakdown {
    /// Tallies a single key into its category bucket.
    pub fn record(&mut self, key: &str) {
        match CacheCategory::of(key) {
            CacheCategory::PokemonList => self.pokemon_list += 1,
            CacheCategory::PokemonDetail => self.pokemon_detail += 1,
            CacheCategory::TypeList => self.type_list += 1,
            CacheCategory::TypeDetail => self.type_detail += 1,
            CacheCategory::Other => self.other += 1,
        }
    }

    /// Sum of all category buckets.
    pub fn total(&self) -> usize {
        self.pokemon_list + self.pokemon_detail + self.type_list + self.type_detail + self.other
    }
}

// == Cache Stats ==
/// Cache introspection payload.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Number of entries currently stored
    pub total_entries: usize,
    /// Configured TTL in seconds
    pub ttl_seconds: u64,
    /// Stored keys classified by prefix
    pub categories: CategoryBreakdown,
}
