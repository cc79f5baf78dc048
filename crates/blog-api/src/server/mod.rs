//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use blog_cache::{RedisPool, RedisTokenRepository};
use blog_common::{AppConfig, AppError, Argon2Hasher, JwtService, SessionStoreKind};
use blog_core::TokenRepository;
use blog_db::{create_pool, run_migrations, PgTokenRepository, PgUserRepository};
use blog_service::{ServiceContextBuilder, SessionSettings};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::{AppState, Backends};
use crate::sweeper::spawn_token_sweeper;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_rate_limit(create_router(&state), &config.rate_limit);
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());

    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = blog_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Select the refresh token store
    let mut redis = None;
    let token_repo: Arc<dyn TokenRepository> = match config.session.store {
        SessionStoreKind::Postgres => Arc::new(PgTokenRepository::new(pool.clone())),
        SessionStoreKind::Redis => {
            info!("Connecting to Redis...");
            let redis_pool =
                RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
            redis_pool
                .health_check()
                .await
                .map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis connection established");
            redis = Some(redis_pool.clone());
            Arc::new(RedisTokenRepository::new(redis_pool))
        }
    };

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .token_repo(token_repo)
        .hasher(Arc::new(Argon2Hasher::new()))
        .signer(Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
        )))
        .settings(SessionSettings::from(&config.session))
        .build()?;

    Ok(AppState::new(service_context, config).with_backends(Backends {
        database: Some(pool),
        redis,
    }))
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid bind address: {e}")))?;
    let sweep_interval = config.session.sweep_interval_secs;

    // Create app state
    let state = create_app_state(config).await?;

    // Start the expired token sweep
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = (sweep_interval > 0).then(|| {
        spawn_token_sweeper(
            state.service_context().clone(),
            Duration::from_secs(sweep_interval),
            shutdown_rx,
        )
    });

    // Build application and serve
    let app = create_app(state);
    let result = run_server(app, addr).await;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = sweeper {
        let _ = handle.await;
    }

    info!("Server stopped");
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
