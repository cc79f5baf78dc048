//! Database models - SQLx-compatible structs for PostgreSQL tables

mod user;
mod user_token;

pub use user::UserModel;
pub use user_token::UserTokenModel;
