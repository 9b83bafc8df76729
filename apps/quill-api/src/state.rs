//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::services::{AuthorService, PostService};
use quill_infra::{
    Argon2PasswordHasher, DbConn, DbErr, DbSession, JwtTokenCodec, SeaOrmAuthorRepository,
    SeaOrmPostRepository, SessionTransactionManager, connect,
};

use crate::config::AppConfig;

/// Shared application state: the connection pool and the stateless auth
/// implementations. Services are built per request so that each one runs on
/// its own session (one in-flight transaction per logical request).
#[derive(Clone)]
pub struct AppState {
    db: DbConn,
    pub tokens: Arc<JwtTokenCodec>,
    pub passwords: Arc<Argon2PasswordHasher>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = connect(&config.database).await?;

        tracing::info!("Application state initialized");

        Ok(Self::with_connection(db))
    }

    /// Build state over an already established connection.
    pub fn with_connection(db: DbConn) -> Self {
        Self {
            db,
            tokens: Arc::new(JwtTokenCodec::from_env()),
            passwords: Arc::new(Argon2PasswordHasher::new()),
        }
    }

    /// Round-trip the connection pool. Used by the health endpoint.
    pub async fn database_reachable(&self) -> bool {
        if let Err(e) = self.db.ping().await {
            tracing::warn!(error = %e, "database ping failed");
            return false;
        }
        true
    }

    /// Author service over a fresh session.
    pub fn author_service(&self) -> AuthorService {
        let session = Arc::new(DbSession::new(self.db.clone()));
        AuthorService::new(
            Arc::new(SeaOrmAuthorRepository::new(session.clone())),
            Arc::new(SessionTransactionManager::new(session)),
        )
    }

    /// Post service over a fresh session.
    pub fn post_service(&self) -> PostService {
        let session = Arc::new(DbSession::new(self.db.clone()));
        PostService::new(
            Arc::new(SeaOrmPostRepository::new(session.clone())),
            Arc::new(SessionTransactionManager::new(session)),
        )
    }
}
