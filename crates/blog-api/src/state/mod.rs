//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and the backends probed by readiness.

use std::sync::Arc;

use blog_cache::RedisPool;
use blog_common::AppConfig;
use blog_db::PgPool;
use blog_service::ServiceContext;

use crate::cookies::CookiePolicy;

/// Connection pools checked by the readiness probe
#[derive(Clone, Default)]
pub struct Backends {
    pub database: Option<PgPool>,
    pub redis: Option<RedisPool>,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    backends: Backends,
    cookie_policy: CookiePolicy,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let cookie_policy = CookiePolicy::from_config(&config);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            backends: Backends::default(),
            cookie_policy,
        }
    }

    #[must_use]
    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Attributes applied to the refresh token cookie
    pub fn cookie_policy(&self) -> CookiePolicy {
        self.cookie_policy
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("cookie_policy", &self.cookie_policy)
            .finish()
    }
}
