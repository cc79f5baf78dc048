//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//!
//! Field names follow the camelCase wire format of the blog API.

pub mod requests;
pub mod responses;

pub use requests::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateEmailRequest, UpdateProfileRequest,
    UserLookupQuery,
};
pub use responses::{
    AuthResponse, HealthChecks, HealthResponse, MessageResponse, ReadinessResponse, UserResponse,
};
