//! Security collaborators - password hashing and access token signing

use crate::entities::{AccessClaims, SignedAccessToken, User};
use crate::error::DomainError;

/// Slow, salted one-way password hashing
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Compare a plaintext password against a stored hash in constant time
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;

    /// Spend the cost of one verification when there is no stored hash to check
    fn verify_decoy(&self, password: &str) {
        let _ = password;
    }
}

/// Issues and verifies stateless access tokens
pub trait TokenSigner: Send + Sync {
    /// Sign an access token asserting `{sub: user.id, email: user.email}`
    fn sign(&self, user: &User) -> Result<SignedAccessToken, DomainError>;

    /// Verify signature and expiry, returning the claims
    fn verify(&self, token: &str) -> Result<AccessClaims, DomainError>;
}
