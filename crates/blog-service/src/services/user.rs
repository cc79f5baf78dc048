//! User service
//!
//! Handles account registration, profile lookup and the caller's own account
//! changes: password, email, profile and deletion.

use blog_common::auth::validate_password_strength;
use blog_common::AppError;
use blog_core::entities::{NewUser, User};
use blog_core::UserId;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{ChangePasswordRequest, RegisterRequest, UpdateEmailRequest, UpdateProfileRequest};

use super::auth::AuthService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        request.validate()?;
        validate_password_strength(&request.user_password)?;

        let user_id = UserId::parse(&request.user_id).map_err(blog_core::DomainError::from)?;
        let new_user = NewUser {
            id: user_id,
            email: request.user_email,
            nickname: request.user_nickname,
            thumbnail_url: None,
            blog_name: request.user_blog_name,
        };
        new_user.validate()?;

        let users = self.ctx.user_repo();
        if users.id_exists(&new_user.id).await? {
            return Err(ServiceError::conflict("User ID already taken"));
        }
        if users.email_exists(&new_user.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = self.ctx.hasher().hash(&request.user_password)?;
        let user = users.create(&new_user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.as_str()))
    }

    /// Get user by ID, matching only if `email` (when given) is theirs too
    #[instrument(skip(self))]
    pub async fn find_user(&self, user_id: &UserId, email: Option<&str>) -> ServiceResult<User> {
        let users = self.ctx.user_repo();
        let found = match email {
            Some(email) => users.find_by_id_and_email(user_id, email).await?,
            None => users.find_by_id(user_id).await?,
        };
        found.ok_or_else(|| ServiceError::not_found("User", user_id.as_str()))
    }

    /// Move the caller to a new email address
    #[instrument(skip(self, request))]
    pub async fn update_email(
        &self,
        user_id: &UserId,
        request: UpdateEmailRequest,
    ) -> ServiceResult<User> {
        request.validate()?;

        let users = self.ctx.user_repo();
        if let Some(holder) = users.find_by_email(&request.user_email).await? {
            if &holder.id != user_id {
                return Err(ServiceError::conflict("Email already registered"));
            }
        }

        let user = users.update_email(user_id, &request.user_email).await?;
        info!(user_id = %user_id, "Email updated");
        Ok(user)
    }

    /// Replace the caller's nickname and blog name
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<User> {
        request.validate()?;
        if request.user_nickname.trim().is_empty() {
            return Err(ServiceError::validation("Nickname must not be blank"));
        }

        let user = self
            .ctx
            .user_repo()
            .update_profile(
                user_id,
                &request.user_nickname,
                request.user_blog_name.as_deref(),
            )
            .await?;
        info!(user_id = %user_id, "Profile updated");
        Ok(user)
    }

    /// Delete the caller's account after revoking every refresh token they hold
    ///
    /// Returns the number of revoked refresh tokens.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: &UserId) -> ServiceResult<u64> {
        let revoked = AuthService::new(self.ctx).logout_all(user_id).await?;
        if !self.ctx.user_repo().delete(user_id).await? {
            return Err(ServiceError::not_found("User", user_id.as_str()));
        }
        info!(user_id = %user_id, revoked, "Account deleted");
        Ok(revoked)
    }

    /// Change the caller's password and revoke all of their refresh tokens
    ///
    /// Returns the number of revoked refresh tokens.
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: &UserId,
        request: ChangePasswordRequest,
    ) -> ServiceResult<u64> {
        request.validate()?;

        let users = self.ctx.user_repo();
        let current_hash = users
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.as_str()))?;

        if !self
            .ctx
            .hasher()
            .verify(&request.current_password, &current_hash)?
        {
            warn!(user_id = %user_id, "Password change rejected: wrong current password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        validate_password_strength(&request.new_password)?;

        let new_hash = self.ctx.hasher().hash(&request.new_password)?;
        users.update_password(user_id, &new_hash).await?;

        let revoked = AuthService::new(self.ctx).logout_all(user_id).await?;
        info!(user_id = %user_id, revoked, "Password changed");
        Ok(revoked)
    }
}
