//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! sea-orm repositories and the session-scoped transaction manager, plus the
//! JWT token codec and argon2 password hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordHasher, JwtConfig, JwtTokenCodec};
pub use sea_orm::{DbConn, DbErr};
pub use database::{
    DatabaseConfig, DbSession, SeaOrmAuthorRepository, SeaOrmPostRepository,
    SessionTransactionManager, connect,
};
