//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use blog_core::User;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::Session;

// ============================================================================
// Auth Responses
// ============================================================================

/// Login and refresh response body
///
/// The refresh token travels only in its cookie, never in the body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token expiry in Unix milliseconds
    pub access_token_expire_date: i64,
    pub user: UserResponse,
}

impl From<&Session> for AuthResponse {
    fn from(session: &Session) -> Self {
        Self {
            access_token: session.access_token.clone(),
            access_token_expire_date: session.access_token_expires_at.timestamp_millis(),
            user: UserResponse::from(&session.user),
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
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

// ============================================================================
// User Responses
// ============================================================================

/// Public user information
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub user_email: String,
    pub user_nickname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_blog_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            user_email: user.email.clone(),
            user_nickname: user.nickname.clone(),
            user_thumbnail_url: user.thumbnail_url.clone(),
            user_blog_name: user.blog_name.clone(),
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<bool>,
}

impl ReadinessResponse {
    pub fn new(checks: HealthChecks) -> Self {
        let ready = checks.database && checks.redis.unwrap_or(true);
        Self {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            checks,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
