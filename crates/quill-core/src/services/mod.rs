//! Services - orchestrate repositories behind the transaction boundary.
//!
//! Reads forward the repository result. Writes generate ids where needed,
//! call the repository, then commit on success or roll back on failure and
//! surface a typed [`DomainError`] so callers can tell "not found" from
//! "forbidden" from "internal failure".

mod author;
mod post;

pub use author::AuthorService;
pub use post::PostService;

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{DomainError, RepoError};
use crate::ports::TransactionManager;

fn repo_to_domain(entity_type: &'static str, id: Uuid, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound { entity_type, id },
        RepoError::WrongOwner => DomainError::Forbidden,
        RepoError::Constraint(msg) => DomainError::Duplicate(msg),
        RepoError::Connection(msg) | RepoError::Query(msg) => {
            tracing::error!(entity_type, %id, error = %msg, "storage failure");
            DomainError::Internal(msg)
        }
    }
}

/// Finish a write: commit on success, rollback on failure.
///
/// A rollback failure is logged but not propagated - the repository error
/// that triggered it is the one the caller needs.
async fn finish_write<T>(
    tm: &Arc<dyn TransactionManager>,
    entity_type: &'static str,
    id: Uuid,
    result: Result<T, RepoError>,
) -> Result<T, DomainError> {
    match result {
        Ok(value) => {
            tm.commit()
                .await
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rb) = tm.rollback().await {
                tracing::warn!(entity_type, %id, error = %rb, "rollback failed");
            }
            Err(repo_to_domain(entity_type, id, err))
        }
    }
}

fn read_error(entity_type: &'static str, err: RepoError) -> DomainError {
    tracing::error!(entity_type, error = %err, "read failed");
    DomainError::Internal(err.to_string())
}
