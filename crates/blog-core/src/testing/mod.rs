//! In-memory repositories
//!
//! Backed by process-local maps; suitable for unit tests and local
//! experiments, never for a multi-instance deployment.

mod memory_tokens;
mod memory_users;

pub use memory_tokens::MemoryTokenRepository;
pub use memory_users::MemoryUserRepository;
