//! # blog-core
//!
//! Domain layer containing entities, value objects, and the collaborator
//! traits the session manager depends on.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types at crate root
pub use entities::{AccessClaims, NewUser, RefreshToken, SignedAccessToken, User};
pub use error::DomainError;
pub use traits::{CredentialHasher, RepoResult, TokenRepository, TokenSigner, UserRepository};
pub use value_objects::{UserId, UserIdParseError};
