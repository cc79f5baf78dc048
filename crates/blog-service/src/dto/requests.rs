//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use crate::services::LoginCredentials;

// ============================================================================
// Auth Requests
// ============================================================================

/// User login request
///
/// Either `userId` or `userEmail` identifies the account.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub user_email: Option<String>,

    pub user_password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_id", &self.user_id)
            .field("user_email", &self.user_email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for LoginCredentials {
    fn from(req: LoginRequest) -> Self {
        Self {
            user_id: req.user_id,
            email: req.user_email,
            password: req.user_password,
        }
    }
}

// ============================================================================
// User Requests
// ============================================================================

/// User registration request
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "User ID must be 1-50 characters"))]
    pub user_id: String,

    #[validate(email(message = "Invalid email format"))]
    pub user_email: String,

    #[validate(length(min = 1, max = 100, message = "Nickname must be 1-100 characters"))]
    pub user_nickname: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub user_password: String,

    #[validate(length(max = 1000, message = "Blog name must be at most 1000 characters"))]
    #[serde(default)]
    pub user_blog_name: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("user_id", &self.user_id)
            .field("user_email", &self.user_email)
            .field("user_nickname", &self.user_nickname)
            .field("user_blog_name", &self.user_blog_name)
            .finish_non_exhaustive()
    }
}

/// Change own password request
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

/// Change own email request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub user_email: String,
}

/// Change own nickname and blog name
///
/// An absent `userBlogName` clears the blog name.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Nickname must be 1-100 characters"))]
    pub user_nickname: String,

    #[validate(length(max = 1000, message = "Blog name must be at most 1000 characters"))]
    #[serde(default)]
    pub user_blog_name: Option<String>,
}

/// Query string of the public profile lookup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserLookupQuery {
    #[serde(default)]
    pub email: Option<String>,
}
