//! Proxied Pokémon read handlers.
//!
//! All four are optional-identity endpoints: a valid token is accepted but
//! nothing here depends on who is asking.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::auth::MaybeUser;
use crate::error::Result;
use crate::models::ListParams;

use super::AppState;

/// Handler for GET /api/pokemon
///
/// Paginated list. `limit` is clamped to `[0, 1000]` and `offset` to `>= 0`
/// before the cache key is computed.
pub async fn list(
    State(state): State<AppState>,
    _user: MaybeUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let payload = state.proxy.list(params.limit(), params.offset()).await?;
    Ok(Json(payload))
}

/// Handler for GET /api/pokemon/:name
pub async fn detail(
    State(state): State<AppState>,
    _user: MaybeUser,
    Path(name): Path<String>,
) -> Result<Json<Value>> {
    let payload = state.proxy.detail(&name).await?;
    Ok(Json(payload))
}

/// Handler for GET /api/type
pub async fn list_types(State(state): State<AppState>, _user: MaybeUser) -> Result<Json<Value>> {
    let payload = state.proxy.types().await?;
    Ok(Json(payload))
}

/// Handler for GET /api/type/:name
///
/// Returns the normalized `{count, results}` shape, not the raw upstream
/// payload.
pub async fn list_by_type(
    State(state): State<AppState>,
    _user: MaybeUser,
    Path(name): Path<String>,
) -> Result<Json<Value>> {
    let payload = state.proxy.list_by_type(&name).await?;
    Ok(Json(payload))
}
