//! Authentication utilities

mod jwt;
mod password;
mod refresh_token;

pub use jwt::JwtService;
pub use password::{
    hash_password, validate_password_strength, verify_password, Argon2Hasher, MIN_PASSWORD_LEN,
};
pub use refresh_token::{generate_refresh_token_value, REFRESH_TOKEN_BYTES};
