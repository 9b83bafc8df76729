//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod tx;

pub use auth::{HashError, PasswordHasher, TokenCodec, TokenError, TokenScope};
pub use repository::{AuthorRepository, PostRepository};
pub use tx::TransactionManager;
