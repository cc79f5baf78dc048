//! # blog-api
//!
//! REST API server built with Axum: the HTTP adapter over the session manager.

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
pub mod sweeper;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;
