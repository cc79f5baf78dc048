//! JWT utilities for authentication
//!
//! Provides access token encoding, decoding, and validation using the
//! `jsonwebtoken` crate (HS256).

use blog_core::{AccessClaims, DomainError, SignedAccessToken, TokenSigner, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// JWT service for encoding and decoding access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and access token lifetime (seconds)
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }
}

impl TokenSigner for JwtService {
    fn sign(&self, user: &User) -> Result<SignedAccessToken, DomainError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.access_token_expiry);

        let claims = AccessClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::SigningError(e.to_string()))?;

        Ok(SignedAccessToken { token, expires_at })
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, DomainError> {
        let validation = Validation::default();

        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => DomainError::TokenExpired,
                    _ => DomainError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
