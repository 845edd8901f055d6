//! Request and Response models for the API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AddMemberRequest, ListParams, LoginRequest, RegisterRequest, ResetPasswordRequest};
pub use responses::{
    AdminUserResponse, AuthResponse, ErrorResponse, HealthResponse, MessageResponse, SeedResponse,
    UserResponse,
};
