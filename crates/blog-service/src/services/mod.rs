//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and orchestrate the stores and
//! security collaborators it holds.

pub mod auth;
pub mod context;
pub mod error;
pub mod user;

pub use auth::{AuthService, LoginCredentials, Session};
pub use context::{ServiceContext, ServiceContextBuilder, SessionSettings};
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
