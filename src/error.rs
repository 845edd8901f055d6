//! Error types for the API
//!
//! Provides unified error handling using thiserror. Every variant maps to an
//! HTTP status; upstream failures are forwarded with their original status
//! and body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::storage::DatabaseError;

// == API Error Enum ==
/// Unified error type for the API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed request data
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Duplicate unique field
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid identity on a protected endpoint
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but lacking privilege
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Missing or not-owned resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Battle team is at its 6-member cap
    #[error("Capacity: {0}")]
    Capacity(String),

    /// Upstream failure forwarded with its original status and body
    #[error("Upstream returned status {status}")]
    Upstream { status: u16, body: Value },

    /// Upstream could not be reached (timeout, connection failure)
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Upstream failures pass through unmodified
            ApiError::Upstream { status, body } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return (status, Json(body)).into_response();
            }
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Capacity(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UpstreamUnavailable(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Database(DatabaseError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Database(DatabaseError::Conflict(msg)) => (StatusCode::CONFLICT, msg),
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the API.
pub type Result<T> = std::result::Result<T, ApiError>;
