//! Per-request database session and its transaction manager.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseTransaction, DbConn, TransactionTrait};
use tokio::sync::{Mutex, MutexGuard};

use quill_core::error::RepoError;
use quill_core::ports::TransactionManager;

/// One database session per logical request.
///
/// The underlying transaction begins lazily on first use and is the single
/// unit of work for the request: repositories run their queries on it, and
/// [`SessionTransactionManager`] commits or rolls it back. Never shared
/// across requests. A session dropped with an open transaction rolls back at
/// the driver.
pub struct DbSession {
    conn: DbConn,
    txn: Mutex<Option<DatabaseTransaction>>,
}

/// Holds the session lock for the duration of one repository call, keeping
/// query execution and the commit/rollback path serialized.
pub(crate) struct SessionGuard<'a>(MutexGuard<'a, Option<DatabaseTransaction>>);

impl DbSession {
    pub fn new(conn: DbConn) -> Self {
        Self {
            conn,
            txn: Mutex::new(None),
        }
    }

    /// Lock the session, beginning the transaction if this is the first use.
    pub(crate) async fn acquire(&self) -> Result<SessionGuard<'_>, RepoError> {
        let mut guard = self.txn.lock().await;

        if guard.is_none() {
            let txn = self
                .conn
                .begin()
                .await
                .map_err(|e| RepoError::Connection(e.to_string()))?;
            *guard = Some(txn);
        }

        Ok(SessionGuard(guard))
    }
}

impl SessionGuard<'_> {
    pub(crate) fn txn(&self) -> Result<&DatabaseTransaction, RepoError> {
        self.0
            .as_ref()
            .ok_or_else(|| RepoError::Connection("transaction already finished".to_string()))
    }
}

/// Commit/rollback handle over a [`DbSession`].
pub struct SessionTransactionManager {
    session: Arc<DbSession>,
}

impl SessionTransactionManager {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl TransactionManager for SessionTransactionManager {
    async fn commit(&self) -> Result<(), RepoError> {
        let mut guard = self.session.txn.lock().await;

        // No transaction begun means nothing to persist.
        match guard.take() {
            Some(txn) => txn
                .commit()
                .await
                .map_err(|e| RepoError::Query(e.to_string())),
            None => Ok(()),
        }
    }

    async fn rollback(&self) -> Result<(), RepoError> {
        let mut guard = self.session.txn.lock().await;

        match guard.take() {
            Some(txn) => txn
                .rollback()
                .await
                .map_err(|e| RepoError::Query(e.to_string())),
            None => Ok(()),
        }
    }
}
