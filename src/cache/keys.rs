//! Cache Key Module
//!
//! Builders and classification for the string key space. Keys are
//! case-preserving and the category prefixes do not collide.

// == Key Builders ==

/// Key for the fixed type-list payload.
pub const TYPE_LIST_KEY: &str = "type_list";

/// Key for a paginated Pokémon list page.
pub fn list_key(limit: i64, offset: i64) -> String {
    format!("pokemon_list_{}_{}", limit, offset)
}

/// Key for a single Pokémon detail payload.
pub fn detail_key(name: &str) -> String {
    format!("pokemon_detail_{}", name)
}

/// Key for a normalized by-type listing.
pub fn type_detail_key(name: &str) -> String {
    format!("type_detail_{}", name)
}

// == Category Classification ==
/// The key categories reported by cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCategory {
    PokemonList,
    PokemonDetail,
    TypeList,
    TypeDetail,
    Other,
}

impl CacheCategory {
    /// Classifies a stored key by its prefix.
    ///
    /// `type_list` is matched exactly before the `type_detail_` prefix so the
    /// two type categories never overlap.
    pub fn of(key: &str) -> Self {
        if key == TYPE_LIST_KEY {
            CacheCategory::TypeList
        } else if key.starts_with("pokemon_list_") {
            CacheCategory::PokemonList
        } else if key.starts_with("pokemon_detail_") {
            CacheCategory::PokemonDetail
        } else if key.starts_with("type_detail_") {
            CacheCategory::TypeDetail
        } else {
            CacheCategory::Other
        }
    }
}
