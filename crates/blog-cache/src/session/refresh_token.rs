//! Refresh token storage in Redis.
//!
//! Each token lives under its own key with a Redis TTL matching its expiry,
//! so expired tokens disappear without a sweep. A per-user set indexes the
//! tokens a user holds for "log out everywhere".

use async_trait::async_trait;
use blog_core::{RefreshToken, RepoResult, TokenRepository, UserId};
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Script};
use serde::{Deserialize, Serialize};

use crate::pool::RedisPool;
use crate::RedisPoolError;

const ROTATE_TOKEN: &str = include_str!("rotate_token.lua");
const REVOKE_TOKEN: &str = include_str!("revoke_token.lua");

/// Key prefix for refresh tokens
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

/// Key prefix for the per-user token index
const USER_TOKENS_PREFIX: &str = "user_refresh_tokens:";

/// Stored refresh token data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    /// User ID this token belongs to
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenData {
    fn from_token(token: &RefreshToken) -> Self {
        Self {
            user_id: token.user_id.clone(),
            expires_at: token.expires_at,
            created_at: token.created_at,
        }
    }

    fn into_token(self, value: &str) -> RefreshToken {
        RefreshToken {
            token: value.to_string(),
            user_id: self.user_id,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }

    /// Seconds until expiry, at least 1 (Redis rejects a zero TTL)
    fn ttl_seconds(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(1) as u64
    }
}

/// Redis implementation of [`TokenRepository`]
///
/// Rotation and scoped revocation run as Lua scripts, so the owner check and
/// every key they touch change in one step: of several concurrent rotations
/// only one sees the old token, and a rejected call leaves it untouched.
#[derive(Clone, Debug)]
pub struct RedisTokenRepository {
    pool: RedisPool,
}

impl RedisTokenRepository {
    /// Create a new refresh token repository
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Generate Redis key for a refresh token
    fn key(token: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{token}")
    }

    /// Generate Redis key for a user's token index
    fn user_key(user_id: &UserId) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn insert(&self, token: &RefreshToken) -> RepoResult<()> {
        let data = RefreshTokenData::from_token(token);
        let ttl = data.ttl_seconds(Utc::now());
        self.pool.set(&Self::key(&token.token), &data, ttl).await?;

        let user_key = Self::user_key(&token.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, &token.token)
            .await
            .map_err(RedisPoolError::from)?;
        conn.expire::<_, ()>(&user_key, ttl as i64)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::debug!(user_id = %token.user_id, "Stored refresh token");
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        let data: Option<RefreshTokenData> = self.pool.get_value(&Self::key(token)).await?;
        Ok(data.map(|d| d.into_token(token)))
    }

    async fn delete_by_token_and_user(&self, token: &str, user_id: &UserId) -> RepoResult<bool> {
        let script = Script::new(REVOKE_TOKEN);
        let mut conn = self.pool.get().await?;
        let deleted: i64 = script
            .key(Self::key(token))
            .key(Self::user_key(user_id))
            .arg(user_id.as_str())
            .arg(token)
            .invoke_async(&mut conn)
            .await
            .map_err(RedisPoolError::from)?;

        if deleted == 1 {
            tracing::debug!(user_id = %user_id, "Revoked refresh token");
        }
        Ok(deleted == 1)
    }

    async fn rotate(
        &self,
        token: &str,
        user_id: &UserId,
        replacement: &RefreshToken,
    ) -> RepoResult<Option<RefreshToken>> {
        let data = RefreshTokenData::from_token(replacement);
        let ttl = data.ttl_seconds(Utc::now());
        let serialized = serde_json::to_string(&data).map_err(RedisPoolError::from)?;

        let script = Script::new(ROTATE_TOKEN);
        let mut conn = self.pool.get().await?;
        let previous: Option<String> = script
            .key(Self::key(token))
            .key(Self::key(&replacement.token))
            .key(Self::user_key(user_id))
            .key(Self::user_key(&replacement.user_id))
            .arg(user_id.as_str())
            .arg(serialized)
            .arg(ttl)
            .arg(token)
            .arg(&replacement.token)
            .invoke_async(&mut conn)
            .await
            .map_err(RedisPoolError::from)?;

        let Some(previous) = previous else {
            return Ok(None);
        };
        let data: RefreshTokenData =
            serde_json::from_str(&previous).map_err(RedisPoolError::from)?;
        tracing::debug!(user_id = %user_id, "Rotated refresh token");
        Ok(Some(data.into_token(token)))
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let tokens: Vec<String> = conn
            .smembers(&user_key)
            .await
            .map_err(RedisPoolError::from)?;
        let keys: Vec<String> = tokens.iter().map(|t| Self::key(t)).collect();
        let count = self.pool.delete_many(&keys).await?;

        conn.del::<_, ()>(&user_key)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh tokens for user");
        Ok(count)
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> RepoResult<u64> {
        // Keys carry their own TTL
        Ok(0)
    }
}
