//! Request extractors for the three endpoint auth modes.
//!
//! - `AuthUser`: required identity, fails closed with 401
//! - `MaybeUser`: optional identity, proceeds either way
//! - `AdminUser`: required identity plus the admin flag, 403 otherwise

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::AppState;
use crate::error::ApiError;
use crate::storage::User;

/// Identity of an authenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Identity of a caller on an optional-identity endpoint, if present and
/// valid.
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<i64>);

/// An authenticated caller verified to be an admin.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: User,
}

/// Pulls the token out of an `Authorization: Bearer …` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the caller's user ID, or the reason there is none.
fn resolve_identity(parts: &Parts, state: &AppState) -> Result<i64, ApiError> {
    let token =
        bearer_token(parts).ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

    let claims = state
        .jwt
        .validate(token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".into()))?;

    claims
        .user_id()
        .ok_or_else(|| ApiError::Unauthorized("Invalid token subject".into()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = resolve_identity(parts, state)?;
        Ok(AuthUser { user_id })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_identity(parts, state).ok()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = resolve_identity(parts, state)?;
        let user = state
            .db
            .get_user(user_id)
            .await
            .map_err(|_| ApiError::Unauthorized("Unknown user".into()))?;

        if !user.is_admin {
            return Err(ApiError::Forbidden(
                "Administrator privileges required".into(),
            ));
        }

        Ok(AdminUser { user })
    }
}
