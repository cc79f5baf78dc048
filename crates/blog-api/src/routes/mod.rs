//! Route definitions
//!
//! Every API route is declared in one table together with its
//! [`AuthRequirement`]. Authenticated entries are wrapped with the
//! `require_auth` layer, so a handler can never be mounted without its check.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put, MethodRouter},
    Router,
};

use crate::handlers::{auth, health, users};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Who may call a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// No credentials needed
    Public,
    /// A valid bearer access token is required
    Authenticated,
}

/// One row of the route table
pub struct RouteEntry {
    pub path: &'static str,
    pub requirement: AuthRequirement,
    pub handler: MethodRouter<AppState>,
}

impl RouteEntry {
    fn public(path: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            path,
            requirement: AuthRequirement::Public,
            handler,
        }
    }

    fn authenticated(path: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            path,
            requirement: AuthRequirement::Authenticated,
            handler,
        }
    }
}

/// The API v1 route table, relative to `/api/v1`
pub fn route_table() -> Vec<RouteEntry> {
    vec![
        RouteEntry::public("/user/signup", post(users::signup)),
        RouteEntry::public("/user/login", post(auth::login)),
        RouteEntry::public("/user/refresh", post(auth::refresh)),
        RouteEntry::authenticated("/user/logout", post(auth::logout)),
        RouteEntry::authenticated(
            "/user/me",
            get(users::get_current_user).delete(users::delete_account),
        ),
        RouteEntry::authenticated("/user/password", put(users::change_password)),
        RouteEntry::authenticated("/user/email", put(users::update_email)),
        RouteEntry::authenticated("/user/profile", put(users::update_profile)),
        RouteEntry::public("/user/:user_id", get(users::get_user)),
    ]
}

/// Create the main API router (health routes are mounted separately)
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/api/v1", build_routes(route_table(), state))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn build_routes(table: Vec<RouteEntry>, state: &AppState) -> Router<AppState> {
    table.into_iter().fold(Router::new(), |router, entry| {
        let handler = match entry.requirement {
            AuthRequirement::Public => entry.handler,
            AuthRequirement::Authenticated => entry
                .handler
                .route_layer(from_fn_with_state(state.clone(), require_auth)),
        };
        router.route(entry.path, handler)
    })
}
