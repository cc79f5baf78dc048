//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Password accepted by the strength policy
pub const TEST_PASSWORD: &str = "secret123";

/// Get a unique suffix for test data
///
/// Includes the start time so reruns against the same database do not collide.
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}{n}", chrono::Utc::now().timestamp_millis())
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_id: String,
    pub user_email: String,
    pub user_nickname: String,
    pub user_password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            user_id: format!("it{suffix}"),
            user_email: format!("it{suffix}@example.com"),
            user_nickname: "Integration".to_string(),
            user_password: TEST_PASSWORD.to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub user_password: String,
}

impl LoginRequest {
    pub fn by_id(reg: &RegisterRequest) -> Self {
        Self {
            user_id: Some(reg.user_id.clone()),
            user_email: None,
            user_password: reg.user_password.clone(),
        }
    }

    pub fn by_email(reg: &RegisterRequest) -> Self {
        Self {
            user_id: None,
            user_email: Some(reg.user_email.clone()),
            user_password: reg.user_password.clone(),
        }
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.user_password = password.to_string();
        self
    }
}

/// Change password request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Login / refresh response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub access_token_expire_date: i64,
    pub user: UserResponse,
}

/// Public user response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub user_email: String,
    pub user_nickname: String,
}

/// Acknowledgement response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
