//! Authenticated user extractor
//!
//! The bearer token is verified by the `require_auth` middleware on
//! authenticated routes; this extractor reads the identity it stored.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use blog_core::UserId;

use crate::response::ApiError;

/// Authenticated user extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject
    pub user_id: UserId,
    pub email: String,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(user_id: UserId, email: String) -> Self {
        Self { user_id, email }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::MissingAuth)
    }
}
