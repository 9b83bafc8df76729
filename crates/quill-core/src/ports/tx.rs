//! Unit-of-work boundary.

use async_trait::async_trait;

use crate::error::RepoError;

/// Wraps exactly one unit of work: the writes issued since the last
/// commit/rollback. No nesting.
///
/// Every service operation that performs a write must call exactly one of
/// the two methods - commit on the success path, rollback on any failure
/// path. A unit of work abandoned without either is discarded by the storage
/// driver when the session is dropped.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Persist all operations since the last commit/rollback.
    async fn commit(&self) -> Result<(), RepoError>;

    /// Discard all operations since the last commit/rollback.
    async fn rollback(&self) -> Result<(), RepoError>;
}
