//! Access token claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{UserId, UserIdParseError};

/// Claims carried by a signed access token
///
/// Only the subject and email are asserted; nothing private about the account
/// ever enters a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    pub fn user_id(&self) -> Result<UserId, UserIdParseError> {
        UserId::parse(self.sub.as_str())
    }
}

/// An encoded access token together with its expiry
#[derive(Clone, PartialEq, Eq)]
pub struct SignedAccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for SignedAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedAccessToken")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
