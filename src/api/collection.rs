//! Collection handlers: the caller's battle team and favorites.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::AuthUser;
use crate::error::{ApiError, Result};
use crate::models::AddMemberRequest;
use crate::storage::{CollectionMember, TeamInsert};

use super::AppState;

/// Handler for GET /api/me/team
pub async fn get_team(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CollectionMember>>> {
    let team = state.db.list_team(user.user_id).await?;
    Ok(Json(team))
}

/// Handler for POST /api/me/team
///
/// Rejects the add with 400 once the caller's team holds 6 members; the
/// capacity check and insert are a single atomic statement in storage.
pub async fn add_team_member(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<CollectionMember>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let member = req.into_team_member();
    match state.db.add_team_member(user.user_id, &member).await? {
        TeamInsert::Added(row) => Ok((StatusCode::CREATED, Json(row))),
        TeamInsert::TeamFull => Err(ApiError::Capacity(
            "Battle team already has 6 members".into(),
        )),
    }
}

/// Handler for DELETE /api/me/team/:id
///
/// A row that is not the caller's, or not a team member, reads as absent.
pub async fn remove_team_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
) -> Result<StatusCode> {
    state.db.remove_team_member(user.user_id, member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/me/favorites
pub async fn get_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CollectionMember>>> {
    let favorites = state.db.list_favorites(user.user_id).await?;
    Ok(Json(favorites))
}

/// Handler for POST /api/me/favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<CollectionMember>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let member = req.into_favorite();
    let row = state.db.add_favorite(user.user_id, &member).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Handler for DELETE /api/me/favorites/:id
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(member_id): Path<i64>,
) -> Result<StatusCode> {
    state.db.remove_favorite(user.user_id, member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
