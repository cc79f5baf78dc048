//! Refresh token entity - an opaque, server-side session handle

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::value_objects::UserId;

/// A persisted refresh token
///
/// Each row is single use: a successful refresh consumes it and a brand-new
/// token takes its place.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Build a token issued at `now` that lives for `ttl`
    pub fn issue(token: String, user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            user_id,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// A token is expired once its expiry instant has been reached
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Remaining lifetime, zero once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.is_expired_at(now) {
            Duration::zero()
        } else {
            self.expires_at - now
        }
    }
}

// Token values are bearer credentials; keep them out of logs.
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshToken")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish()
    }
}
