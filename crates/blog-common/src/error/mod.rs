//! Application error types

mod app_error;
mod kind;

pub use app_error::AppError;
pub use kind::ErrorKind;
