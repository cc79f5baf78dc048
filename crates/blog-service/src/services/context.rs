//! Service context - dependency container for services
//!
//! Holds the stores, security collaborators and session settings needed by
//! services. Everything is behind `Arc<dyn ...>` so the HTTP layer can pick
//! Postgres, Redis or in-memory stores at startup.

use std::sync::Arc;

use blog_core::traits::{CredentialHasher, TokenRepository, TokenSigner, UserRepository};
use chrono::Duration;

use super::error::{ServiceError, ServiceResult};

/// Default refresh token lifetime in days
pub const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 14;

/// Session lifetime settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    refresh_token_days: i64,
}

impl SessionSettings {
    pub fn new(refresh_token_days: i64) -> Self {
        Self { refresh_token_days }
    }

    pub fn refresh_token_days(&self) -> i64 {
        self.refresh_token_days
    }

    /// Lifetime of a freshly issued refresh token
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::days(self.refresh_token_days)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_TOKEN_DAYS)
    }
}

impl From<&blog_common::SessionConfig> for SessionSettings {
    fn from(config: &blog_common::SessionConfig) -> Self {
        Self::new(config.refresh_token_days)
    }
}

/// Service context containing all dependencies
///
/// This is the dependency container passed to every service. It provides:
/// - the user store and the refresh token store
/// - the password hasher
/// - the access token signer
/// - session lifetime settings
#[derive(Clone)]
pub struct ServiceContext {
    // Stores
    user_repo: Arc<dyn UserRepository>,
    token_repo: Arc<dyn TokenRepository>,

    // Security
    hasher: Arc<dyn CredentialHasher>,
    signer: Arc<dyn TokenSigner>,

    settings: SessionSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn TokenRepository>,
        hasher: Arc<dyn CredentialHasher>,
        signer: Arc<dyn TokenSigner>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            hasher,
            signer,
            settings,
        }
    }

    // === Stores ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh token repository
    pub fn token_repo(&self) -> &dyn TokenRepository {
        self.token_repo.as_ref()
    }

    // === Security ===

    /// Get the password hasher
    pub fn hasher(&self) -> &dyn CredentialHasher {
        self.hasher.as_ref()
    }

    /// Get the access token signer
    pub fn signer(&self) -> &dyn TokenSigner {
        self.signer.as_ref()
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("security", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    token_repo: Option<Arc<dyn TokenRepository>>,
    hasher: Option<Arc<dyn CredentialHasher>>,
    signer: Option<Arc<dyn TokenSigner>>,
    settings: SessionSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn token_repo(mut self, repo: Arc<dyn TokenRepository>) -> Self {
        self.token_repo = Some(repo);
        self
    }

    pub fn hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn signer(mut self, signer: Arc<dyn TokenSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first unset collaborator
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or(ServiceError::MissingDependency("user_repo"))?,
            self.token_repo
                .ok_or(ServiceError::MissingDependency("token_repo"))?,
            self.hasher.ok_or(ServiceError::MissingDependency("hasher"))?,
            self.signer.ok_or(ServiceError::MissingDependency("signer"))?,
            self.settings,
        ))
    }
}
