//! PostgreSQL implementation of TokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::RefreshToken;
use blog_core::traits::{RepoResult, TokenRepository};
use blog_core::value_objects::UserId;

use crate::models::UserTokenModel;

use super::error::map_db_error;

/// PostgreSQL implementation of TokenRepository
///
/// Rotation is a `DELETE ... RETURNING` plus `INSERT` in one transaction.
/// Postgres row locking makes the second of two concurrent deletes of the
/// same row affect nothing, so only one caller ever consumes a token.
#[derive(Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new PgTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    #[instrument(skip(self, token), fields(user_id = %token.user_id))]
    async fn insert(&self, token: &RefreshToken) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_tokens (token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&token.token)
        .bind(token.user_id.as_str())
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        let result = sqlx::query_as::<_, UserTokenModel>(
            r"
            SELECT token, user_id, expires_at, created_at
            FROM user_tokens
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshToken::from))
    }

    #[instrument(skip(self, token))]
    async fn delete_by_token_and_user(&self, token: &str, user_id: &UserId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE token = $1 AND user_id = $2")
            .bind(token)
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, token, replacement))]
    async fn rotate(
        &self,
        token: &str,
        user_id: &UserId,
        replacement: &RefreshToken,
    ) -> RepoResult<Option<RefreshToken>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let consumed = sqlx::query_as::<_, UserTokenModel>(
            r"
            DELETE FROM user_tokens
            WHERE token = $1 AND user_id = $2
            RETURNING token, user_id, expires_at, created_at
            ",
        )
        .bind(token)
        .bind(user_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(consumed) = consumed else {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        };

        sqlx::query(
            r"
            INSERT INTO user_tokens (token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&replacement.token)
        .bind(replacement.user_id.as_str())
        .bind(replacement.expires_at)
        .bind(replacement.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(RefreshToken::from(consumed)))
    }

    #[instrument(skip(self))]
    async fn delete_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
