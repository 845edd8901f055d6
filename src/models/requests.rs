//! Request DTOs for the API
//!
//! Incoming bodies use optional fields plus a `validate()` step so a missing
//! field produces a clean validation error instead of a deserialization
//! failure.

use serde::Deserialize;

use crate::storage::NewMember;

/// Request body for POST /api/auth/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let all_present = [&self.name, &self.login, &self.email, &self.password]
            .iter()
            .all(|f| f.as_deref().is_some_and(|v| !v.is_empty()));
        if !all_present {
            return Some("Required fields: name, login, email, password".to_string());
        }
        None
    }
}

/// Request body for POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Option<String> {
        if self.login.as_deref().is_none_or(str::is_empty)
            || self.password.as_deref().is_none_or(str::is_empty)
        {
            return Some("Required fields: login, password".to_string());
        }
        None
    }
}

/// Request body for POST /api/auth/reset-password
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub login_or_email: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Option<String> {
        if self.login_or_email.as_deref().is_none_or(str::is_empty)
            || self.new_password.as_deref().is_none_or(str::is_empty)
        {
            return Some("Required fields: login_or_email, new_password".to_string());
        }
        None
    }
}

/// Request body for POST /api/me/team and POST /api/me/favorites
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub type_id: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub is_team_member: Option<bool>,
}

impl AddMemberRequest {
    pub fn validate(&self) -> Option<String> {
        if self.code.as_deref().is_none_or(str::is_empty)
            || self.name.as_deref().is_none_or(str::is_empty)
        {
            return Some("Required fields: code, name".to_string());
        }
        None
    }

    /// Converts into an insert payload for a team add: the team flag is
    /// forced on, the favorite flag defaults off.
    pub fn into_team_member(self) -> NewMember {
        NewMember {
            type_id: self.type_id,
            code: self.code.unwrap_or_default(),
            image_url: self.image_url,
            name: self.name.unwrap_or_default(),
            is_team_member: true,
            is_favorite: self.is_favorite.unwrap_or(false),
        }
    }

    /// Converts into an insert payload for a favorite add: the favorite flag
    /// is forced on, the team flag defaults off.
    pub fn into_favorite(self) -> NewMember {
        NewMember {
            type_id: self.type_id,
            code: self.code.unwrap_or_default(),
            image_url: self.image_url,
            name: self.name.unwrap_or_default(),
            is_team_member: self.is_team_member.unwrap_or(false),
            is_favorite: true,
        }
    }
}

/// Query parameters for GET /api/pokemon
///
/// Values arrive as raw strings: non-numeric input falls back to the
/// defaults rather than rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

impl ListParams {
    /// Default page size when no valid limit is given.
    pub const DEFAULT_LIMIT: i64 = 24;
    /// Largest page the upstream accepts per request.
    pub const MAX_LIMIT: i64 = 1000;

    /// Parsed limit, clamped to `[0, 1000]`.
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(0, Self::MAX_LIMIT)
    }

    /// Parsed offset, clamped to be non-negative.
    pub fn offset(&self) -> i64 {
        self.offset
            .as_deref()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
            .max(0)
    }
}
