//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{NewUser, User};
use blog_core::error::DomainError;
use blog_core::traits::{RepoResult, UserRepository};
use blog_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, nickname, thumbnail_url, blog_name, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_email(&self, id: &UserId, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, nickname, thumbnail_url, blog_name, created_at, updated_at
            FROM users
            WHERE id = $1 AND email = $2
            ",
        )
        .bind(id.as_str())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, email, nickname, thumbnail_url, blog_name, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn id_exists(&self, id: &UserId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let created = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (id, email, nickname, password_hash, thumbnail_url, blog_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, nickname, thumbnail_url, blog_name, created_at, updated_at
            ",
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.nickname)
        .bind(password_hash)
        .bind(&user.thumbnail_url)
        .bind(&user.blog_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some("users_email_key") => DomainError::EmailAlreadyExists,
                _ => DomainError::UserIdAlreadyExists,
            })
        })?;

        Ok(User::from(created))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: &UserId, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_email(&self, id: &UserId, email: &str) -> RepoResult<User> {
        let updated = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET email = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, nickname, thumbnail_url, blog_name, created_at, updated_at
            ",
        )
        .bind(id.as_str())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::EmailAlreadyExists))?;

        updated.map(User::from).ok_or_else(|| user_not_found(id))
    }

    #[instrument(skip(self))]
    async fn update_profile(
        &self,
        id: &UserId,
        nickname: &str,
        blog_name: Option<&str>,
    ) -> RepoResult<User> {
        let updated = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET nickname = $2, blog_name = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, nickname, thumbnail_url, blog_name, created_at, updated_at
            ",
        )
        .bind(id.as_str())
        .bind(nickname)
        .bind(blog_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        updated.map(User::from).ok_or_else(|| user_not_found(id))
    }

    /// Refresh tokens go with the row through `ON DELETE CASCADE`
    #[instrument(skip(self))]
    async fn delete(&self, id: &UserId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
