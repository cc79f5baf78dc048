//! # blog-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_refresh_token_value, hash_password, validate_password_strength, verify_password,
    Argon2Hasher, JwtService, MIN_PASSWORD_LEN, REFRESH_TOKEN_BYTES,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, RedisConfig, ServerConfig, SessionConfig, SessionStoreKind,
};
pub use error::{AppError, ErrorKind};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
