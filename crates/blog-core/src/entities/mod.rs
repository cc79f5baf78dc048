//! Domain entities - core business objects

mod claims;
mod refresh_token;
mod user;

pub use claims::{AccessClaims, SignedAccessToken};
pub use refresh_token::RefreshToken;
pub use user::{NewUser, User};
