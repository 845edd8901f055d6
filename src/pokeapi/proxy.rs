//! Cache-fronted proxy over the upstream client.
//!
//! Every read operation consults the TTL cache before going upstream and
//! stores successful payloads on the way back. Failures are returned
//! unmodified and never cached.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{detail_key, list_key, type_detail_key, CacheStats, ResponseCache, TYPE_LIST_KEY};
use crate::error::{ApiError, Result};
use crate::pokeapi::{PokeApiClient, UpstreamError};

/// Composes the upstream client with the shared response cache.
#[derive(Clone)]
pub struct PokeProxy {
    cache: Arc<RwLock<ResponseCache>>,
    client: PokeApiClient,
}

impl PokeProxy {
    /// Creates a proxy over the given cache handle and client.
    pub fn new(cache: Arc<RwLock<ResponseCache>>, client: PokeApiClient) -> Self {
        Self { cache, client }
    }

    /// Paginated Pokémon list. `limit` and `offset` are expected clamped by
    /// the caller.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Value> {
        let key = list_key(limit, offset);
        if let Some(payload) = self.cache.write().await.get(&key) {
            debug!(key, "cache hit");
            return Ok(payload);
        }

        let payload = self.client.list_page(limit, offset).await.map_err(to_api)?;
        self.cache.write().await.put(key, payload.clone());
        Ok(payload)
    }

    /// Single Pokémon detail.
    pub async fn detail(&self, name: &str) -> Result<Value> {
        let key = detail_key(name);
        if let Some(payload) = self.cache.write().await.get(&key) {
            debug!(key, "cache hit");
            return Ok(payload);
        }

        let payload = self.client.detail(name).await.map_err(to_api)?;
        self.cache.write().await.put(key, payload.clone());
        Ok(payload)
    }

    /// The full type list.
    pub async fn types(&self) -> Result<Value> {
        if let Some(payload) = self.cache.write().await.get(TYPE_LIST_KEY) {
            debug!(key = TYPE_LIST_KEY, "cache hit");
            return Ok(payload);
        }

        let payload = self.client.list_types().await.map_err(to_api)?;
        self.cache.write().await.put(TYPE_LIST_KEY, payload.clone());
        Ok(payload)
    }

    /// Pokémon of a given type, normalized to `{count, results}` where each
    /// result is a well-formed `{name, url}` pair.
    ///
    /// The normalized shape is what gets cached, not the raw upstream one.
    pub async fn list_by_type(&self, name: &str) -> Result<Value> {
        let key = type_detail_key(name);
        if let Some(payload) = self.cache.write().await.get(&key) {
            debug!(key, "cache hit");
            return Ok(payload);
        }

        let raw = self.client.type_detail(name).await.map_err(to_api)?;
        let payload = normalize_type_detail(&raw);
        self.cache.write().await.put(key, payload.clone());
        Ok(payload)
    }

    /// Snapshot of the cache contents.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Flush the cache.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }
}

/// Projects the raw type-detail entry list down to `{name, url}` pairs,
/// dropping entries where either field is missing or empty.
fn normalize_type_detail(raw: &Value) -> Value {
    let results: Vec<Value> = raw
        .get("pokemon")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let p = entry.get("pokemon")?;
                    let name = p.get("name").and_then(Value::as_str)?;
                    let url = p.get("url").and_then(Value::as_str)?;
                    if name.is_empty() || url.is_empty() {
                        return None;
                    }
                    Some(json!({"name": name, "url": url}))
                })
                .collect()
        })
        .unwrap_or_default();

    json!({
        "count": results.len(),
        "results": results
    })
}

fn to_api(err: UpstreamError) -> ApiError {
    match err {
        UpstreamError::Status { status, body } => ApiError::Upstream { status, body },
        UpstreamError::Transport(e) => ApiError::UpstreamUnavailable(e.to_string()),
    }
}
