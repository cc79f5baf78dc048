//! # blog-service
//!
//! Application layer: the session manager (login, refresh rotation, logout),
//! account operations, and the DTOs exchanged with the HTTP adapter.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, LoginCredentials, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, Session, SessionSettings, UserService,
};
