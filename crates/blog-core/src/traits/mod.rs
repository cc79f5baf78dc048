//! Collaborator traits (ports)

mod repositories;
mod security;

pub use repositories::{RepoResult, TokenRepository, UserRepository};
pub use security::{CredentialHasher, TokenSigner};
