//! Entity to model mappers
//!
//! - `From<Model> for Entity`: Convert database rows to domain objects

mod user;
mod user_token;
