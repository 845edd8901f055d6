//! Auth and user management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::{password, AdminUser, AuthUser};
use crate::error::{ApiError, Result};
use crate::models::{
    AdminUserResponse, AuthResponse, LoginRequest, MessageResponse, RegisterRequest,
    ResetPasswordRequest, SeedResponse, UserResponse,
};

use super::AppState;

/// Handler for POST /api/auth/register
///
/// Creates a user and returns a token. The first user ever registered is
/// granted the admin flag.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let login = req.login.as_deref().unwrap_or_default();
    let email = req.email.as_deref().unwrap_or_default();

    if state.db.find_user_by_login(login).await?.is_some() {
        return Err(ApiError::Conflict("Login already in use".into()));
    }
    if state.db.find_user_by_email(email).await?.is_some() {
        return Err(ApiError::Conflict("Email already in use".into()));
    }

    let hash = password::hash_password(req.password.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let user = state
        .db
        .create_user(req.name.as_deref().unwrap_or_default(), login, email, &hash)
        .await?;

    let token = state
        .jwt
        .issue(user.id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, &user))))
}

/// Handler for POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let user = state
        .db
        .find_user_by_login(req.login.as_deref().unwrap_or_default())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".into()))?;

    let valid = password::verify_password(
        req.password.as_deref().unwrap_or_default(),
        &user.password_hash,
    )
    .unwrap_or(false);
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let token = state
        .jwt
        .issue(user.id)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(AuthResponse::new(token, &user)))
}

/// Handler for GET /api/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<UserResponse>> {
    let user = state.db.get_user(user.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Handler for POST /api/auth/reset-password
///
/// Changes the password of the user matching the given login or email.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::Validation(error_msg));
    }

    let user = state
        .db
        .find_user_by_login_or_email(req.login_or_email.as_deref().unwrap_or_default())
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let hash = password::hash_password(req.new_password.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    state.db.update_password(user.id, &hash).await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

/// Handler for GET /api/auth/users
///
/// Admin-only listing of all users, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<AdminUserResponse>>> {
    let users = state.db.list_users().await?;
    Ok(Json(users.iter().map(AdminUserResponse::from).collect()))
}

/// Handler for DELETE /api/auth/users/:id
///
/// Admin-only. Self-deletion is rejected; the target's collection members
/// are removed by cascade.
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if user_id == admin.user.id {
        return Err(ApiError::Validation("You cannot delete your own account".into()));
    }

    // Distinguish an unknown target from a delete failure
    state
        .db
        .get_user(user_id)
        .await
        .map_err(|_| ApiError::NotFound("User not found".into()))?;
    state.db.delete_user(user_id).await?;

    Ok(Json(MessageResponse::new("User deleted")))
}

/// Handler for POST /api/auth/seed/types
///
/// Fills the type lookup table from the upstream type list. Idempotent.
pub async fn seed_types(State(state): State<AppState>) -> Result<Json<SeedResponse>> {
    let payload = state.proxy.types().await?;

    let names: Vec<String> = payload
        .get("results")
        .and_then(serde_json::Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|t| t.get("name").and_then(serde_json::Value::as_str))
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let created = state.db.seed_types(&names).await?;

    Ok(Json(SeedResponse {
        message: "Types loaded".into(),
        created,
    }))
}
