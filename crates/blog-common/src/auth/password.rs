//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use blog_core::{CredentialHasher, DomainError};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::HashingError(format!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| DomainError::HashingError(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Argon2id implementation of [`CredentialHasher`]
///
/// The decoy hash for unknown users is computed up front so the first miss
/// costs the same as every later one.
#[derive(Debug)]
pub struct Argon2Hasher {
    decoy_hash: Option<String>,
}

impl Argon2Hasher {
    /// Create a new hasher
    #[must_use]
    pub fn new() -> Self {
        let decoy_hash = hash_password("decoy-password-never-matches")
            .map_err(|e| tracing::warn!(error = %e, "Decoy hash unavailable; hashing on each miss"))
            .ok();
        Self { decoy_hash }
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        hash_password(password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        verify_password(password, hash)
    }

    fn verify_decoy(&self, password: &str) {
        match &self.decoy_hash {
            Some(hash) => {
                let _ = verify_password(password, hash);
            }
            None => {
                let _ = hash_password(password);
            }
        }
    }
}

/// Validate password strength
///
/// Returns `Ok(())` if the password meets requirements:
/// - At least 8 characters
/// - Contains at least one letter
/// - Contains at least one digit
///
/// # Errors
/// Returns `DomainError::WeakPassword` if the password doesn't meet requirements
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    if !password.chars().any(char::is_alphabetic) {
        return Err(DomainError::WeakPassword(
            "Password must contain at least one letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::WeakPassword(
            "Password must contain at least one digit".to_string(),
        ));
    }

    Ok(())
}
