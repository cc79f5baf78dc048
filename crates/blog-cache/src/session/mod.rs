//! Session storage module.
//!
//! Provides Redis-backed storage for refresh tokens.

mod refresh_token;

pub use refresh_token::{RedisTokenRepository, RefreshTokenData};
