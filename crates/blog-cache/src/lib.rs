//! # blog-cache
//!
//! Redis storage layer for refresh tokens.
//!
//! ## Example
//!
//! ```ignore
//! use blog_cache::{RedisPool, RedisPoolConfig, RedisTokenRepository};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let tokens = RedisTokenRepository::new(pool);
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::{RedisTokenRepository, RefreshTokenData};
