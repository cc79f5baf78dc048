//! User ID - the account handle a user picks at signup
//!
//! Unlike generated identifiers, user IDs are chosen by people and double as
//! the login handle, so parsing enforces the same constraints as the `users`
//! table: 1 to 50 characters, ASCII letters, digits, `_`, `-` or `.`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum length of a user ID (matches the column width)
pub const MAX_USER_ID_LEN: usize = 50;

/// A validated user identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse and validate a user ID
    pub fn parse(value: impl Into<String>) -> Result<Self, UserIdParseError> {
        let value = value.into();
        if value.is_empty() {
            return Err(UserIdParseError::Empty);
        }
        if value.len() > MAX_USER_ID_LEN {
            return Err(UserIdParseError::TooLong { max: MAX_USER_ID_LEN });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(UserIdParseError::InvalidCharacter);
        }
        Ok(Self(value))
    }

    /// Wrap a value already known to be valid (e.g. read back from storage)
    #[inline]
    pub fn from_trusted(value: String) -> Self {
        Self(value)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a [`UserId`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdParseError {
    #[error("user id must not be empty")]
    Empty,

    #[error("user id must be at most {max} characters")]
    TooLong { max: usize },

    #[error("user id may only contain letters, digits, '_', '-' and '.'")]
    InvalidCharacter,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserId::parse(s)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        UserId::parse(raw).map_err(serde::de::Error::custom)
    }
}
