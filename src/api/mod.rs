//! API Module
//!
//! HTTP handlers, routing, and shared application state.
//!
//! # Endpoints
//! - `/api/auth/*` - registration, login, profile, password reset, admin user management
//! - `/api/pokemon`, `/api/type` - cached proxy over the upstream Pokémon API
//! - `/api/cache/*` - cache introspection and flush
//! - `/api/me/team`, `/api/me/favorites` - the caller's collection

pub mod auth;
pub mod collection;
pub mod maintenance;
pub mod pokemon;
pub mod routes;

pub use routes::create_router;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::JwtManager;
use crate::cache::ResponseCache;
use crate::config::Config;
use crate::pokeapi::{PokeApiClient, PokeProxy};
use crate::storage::Database;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite-backed persistence
    pub db: Database,
    /// Token issuance and validation
    pub jwt: JwtManager,
    /// Cache-fronted upstream proxy
    pub proxy: PokeProxy,
}

impl AppState {
    /// Creates application state from configuration and an opened database.
    ///
    /// The response cache lives here, injected into the proxy; it is
    /// process-wide state with the process's lifetime.
    pub fn new(config: &Config, db: Database) -> Self {
        let cache = Arc::new(RwLock::new(ResponseCache::new(config.cache_ttl)));
        let client = PokeApiClient::new(config.pokeapi_base_url.clone());

        Self {
            db,
            jwt: JwtManager::new(config.jwt_secret.as_bytes(), config.token_ttl),
            proxy: PokeProxy::new(cache, client),
        }
    }
}
