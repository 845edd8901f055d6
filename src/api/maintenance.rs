//! Health check and cache maintenance handlers.

use axum::{extract::State, Json};

use crate::auth::{AuthUser, MaybeUser};
use crate::cache::CacheStats;
use crate::models::{HealthResponse, MessageResponse};

use super::AppState;

/// Handler for GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats(State(state): State<AppState>, _user: MaybeUser) -> Json<CacheStats> {
    Json(state.proxy.cache_stats().await)
}

/// Handler for POST /api/cache/clear
///
/// Any authenticated user may flush the cache.
pub async fn cache_clear(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Json<MessageResponse> {
    state.proxy.clear_cache().await;
    Json(MessageResponse::new("Cache cleared"))
}
