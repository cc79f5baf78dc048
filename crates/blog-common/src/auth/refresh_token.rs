//! Opaque refresh token values

use rand::{rngs::OsRng, RngCore};

/// Bytes of entropy in every refresh token
pub const REFRESH_TOKEN_BYTES: usize = 48;

/// Generate a new refresh token value from the OS CSPRNG, hex encoded
#[must_use]
pub fn generate_refresh_token_value() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
