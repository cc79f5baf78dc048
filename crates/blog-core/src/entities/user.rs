//! User entity - a blog author's public account information
//!
//! The password hash is intentionally absent: it lives only in storage and is
//! reachable through `UserRepository::get_password_hash`.

use chrono::{DateTime, Utc};
use validator::ValidateEmail;

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Maximum nickname length
pub const MAX_NICKNAME_LEN: usize = 100;

/// Maximum blog name length
pub const MAX_BLOG_NAME_LEN: usize = 1000;

/// Public user information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub thumbnail_url: Option<String>,
    pub blog_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name for the blog, falling back to the nickname
    pub fn blog_title(&self) -> &str {
        self.blog_name.as_deref().unwrap_or(&self.nickname)
    }
}

/// Data required to register a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub thumbnail_url: Option<String>,
    pub blog_name: Option<String>,
}

impl NewUser {
    pub fn new(id: UserId, email: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            nickname: nickname.into(),
            thumbnail_url: None,
            blog_name: None,
        }
    }

    /// Check field-level rules that storage does not enforce
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.email.validate_email() {
            return Err(DomainError::InvalidEmail);
        }
        let nickname = self.nickname.trim();
        if nickname.is_empty() || nickname.chars().count() > MAX_NICKNAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "nickname must be between 1 and {MAX_NICKNAME_LEN} characters"
            )));
        }
        if self
            .blog_name
            .as_ref()
            .is_some_and(|name| name.chars().count() > MAX_BLOG_NAME_LEN)
        {
            return Err(DomainError::ValidationError(format!(
                "blog name must be at most {MAX_BLOG_NAME_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Materialize the user as it is stored at `now`
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: self.id,
            email: self.email,
            nickname: self.nickname,
            thumbnail_url: self.thumbnail_url,
            blog_name: self.blog_name,
            created_at: now,
            updated_at: now,
        }
    }
}
