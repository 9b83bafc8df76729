//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures surfaced by the services.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Operation forbidden for this author")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
///
/// `NotFound` and `WrongOwner` both mean a write matched zero rows; they are
/// kept distinct so callers can answer 404 vs 403 without a separate
/// check-then-act authorization step.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Entity belongs to a different author")]
    WrongOwner,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
