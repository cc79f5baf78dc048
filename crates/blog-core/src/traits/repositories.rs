//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{NewUser, RefreshToken, User};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>>;

    /// Find user by ID, matching only if the email also matches
    async fn find_by_id_and_email(&self, id: &UserId, email: &str) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if a user ID is already taken
    async fn id_exists(&self, id: &UserId) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user with an already-hashed password
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: &UserId, password_hash: &str) -> RepoResult<()>;

    /// Replace the user's email, failing with `EmailAlreadyExists` if another
    /// account holds it
    async fn update_email(&self, id: &UserId, email: &str) -> RepoResult<User>;

    /// Replace nickname and blog name
    async fn update_profile(
        &self,
        id: &UserId,
        nickname: &str,
        blog_name: Option<&str>,
    ) -> RepoResult<User>;

    /// Delete the user, returning whether a row existed
    async fn delete(&self, id: &UserId) -> RepoResult<bool>;
}

// ============================================================================
// Token Repository
// ============================================================================

/// Persistent storage for refresh tokens, keyed by token value
///
/// Implementations must make [`TokenRepository::rotate`] atomic per token
/// value: of any number of concurrent calls presenting the same token, at
/// most one may observe it as present.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a newly issued token
    async fn insert(&self, token: &RefreshToken) -> RepoResult<()>;

    /// Find a token by its exact value
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>>;

    /// Delete a token only if it belongs to `user_id`. Returns whether a row was removed.
    async fn delete_by_token_and_user(&self, token: &str, user_id: &UserId) -> RepoResult<bool>;

    /// Consume `token` (owned by `user_id`) and persist `replacement` as one unit.
    ///
    /// Returns the consumed row, or `None` if it was already gone, in which
    /// case nothing is persisted.
    async fn rotate(
        &self,
        token: &str,
        user_id: &UserId,
        replacement: &RefreshToken,
    ) -> RepoResult<Option<RefreshToken>>;

    /// Revoke every token belonging to a user
    async fn delete_all_for_user(&self, user_id: &UserId) -> RepoResult<u64>;

    /// Remove tokens whose expiry is at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}
