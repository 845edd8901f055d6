//! Response DTOs for the API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::storage::User;

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            login: user.login.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Response body for successful register/login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(access_token: String, user: &User) -> Self {
        Self {
            access_token,
            user: user.into(),
        }
    }
}

/// Per-user row in the admin user listing.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserResponse {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

impl From<&User> for AdminUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Generic success message body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the type seed operation.
#[derive(Debug, Clone, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub created: u64,
}

/// Response body for the health endpoint (GET /api/health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
