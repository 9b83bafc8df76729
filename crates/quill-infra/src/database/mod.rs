//! Database access: connection pool, per-request sessions, repositories.

mod author_repo;
mod connection;
pub mod entity;
mod post_repo;
mod session;

pub use author_repo::SeaOrmAuthorRepository;
pub use connection::{DatabaseConfig, connect};
pub use post_repo::SeaOrmPostRepository;
pub use session::{DbSession, SessionTransactionManager};

use quill_core::error::RepoError;
use sea_orm::DbErr;

/// Map a storage error onto the repository taxonomy. Unique-constraint
/// violations get their own kind; everything else is a query failure.
pub(crate) fn map_db_err(e: DbErr) -> RepoError {
    let msg = e.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Constraint(msg)
    } else {
        RepoError::Query(msg)
    }
}

#[cfg(test)]
mod tests;
