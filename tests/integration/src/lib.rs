//! Integration test utilities for the blog server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API with a real PostgreSQL (and optionally Redis) backend.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
