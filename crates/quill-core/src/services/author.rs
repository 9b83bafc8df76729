use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Author, AuthorSummary, Outcome};
use crate::error::DomainError;
use crate::ports::{AuthorRepository, TransactionManager};

use super::{finish_write, read_error};

const ENTITY: &str = "author";

/// Author CRUD over one repository and one unit of work.
pub struct AuthorService {
    repo: Arc<dyn AuthorRepository>,
    tm: Arc<dyn TransactionManager>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorRepository>, tm: Arc<dyn TransactionManager>) -> Self {
        Self { repo, tm }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>, DomainError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| read_error(ENTITY, e))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Author>, DomainError> {
        self.repo
            .get_by_email(email)
            .await
            .map_err(|e| read_error(ENTITY, e))
    }

    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<AuthorSummary>, DomainError> {
        self.repo
            .list(skip, limit)
            .await
            .map_err(|e| read_error(ENTITY, e))
    }

    /// Register a new author under a freshly generated id.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Author, DomainError> {
        let id = Uuid::new_v4();
        let result = self.repo.create(id, name, email, password_hash).await;
        finish_write(&self.tm, ENTITY, id, result).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<Outcome, DomainError> {
        let result = self.repo.delete(id).await;
        finish_write(&self.tm, ENTITY, id, result).await
    }

    pub async fn change_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Outcome, DomainError> {
        let result = self.repo.change_password(id, password_hash).await;
        finish_write(&self.tm, ENTITY, id, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionKind, EntityKind};
    use crate::error::RepoError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingTm {
        commits: AtomicUsize,
        rollbacks: AtomicUsize,
    }

    #[async_trait]
    impl TransactionManager for RecordingTm {
        async fn commit(&self) -> Result<(), RepoError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(&self) -> Result<(), RepoError> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    enum Behavior {
        Succeed,
        DuplicateEmail,
        Missing,
    }

    struct StubAuthorRepo {
        behavior: Behavior,
    }

    fn sample_author(id: Uuid) -> Author {
        Author {
            id,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[async_trait]
    impl AuthorRepository for StubAuthorRepo {
        async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
            match self.behavior {
                Behavior::Succeed => Ok(Some(sample_author(id))),
                _ => Ok(None),
            }
        }

        async fn get_by_email(&self, _email: &str) -> Result<Option<Author>, RepoError> {
            Ok(None)
        }

        async fn list(&self, _skip: u64, _limit: u64) -> Result<Vec<AuthorSummary>, RepoError> {
            Ok(vec![])
        }

        async fn create(
            &self,
            id: Uuid,
            _name: &str,
            _email: &str,
            _password_hash: &str,
        ) -> Result<Author, RepoError> {
            match self.behavior {
                Behavior::Succeed => Ok(sample_author(id)),
                Behavior::DuplicateEmail => {
                    Err(RepoError::Constraint("duplicate email".to_string()))
                }
                Behavior::Missing => Err(RepoError::NotFound),
            }
        }

        async fn delete(&self, id: Uuid) -> Result<Outcome, RepoError> {
            match self.behavior {
                Behavior::Succeed => {
                    Ok(Outcome::new(id, EntityKind::Author, ActionKind::Delete))
                }
                _ => Err(RepoError::NotFound),
            }
        }

        async fn change_password(
            &self,
            id: Uuid,
            _password_hash: &str,
        ) -> Result<Outcome, RepoError> {
            match self.behavior {
                Behavior::Succeed => {
                    Ok(Outcome::new(id, EntityKind::Author, ActionKind::Update))
                }
                _ => Err(RepoError::NotFound),
            }
        }
    }

    fn service(behavior: Behavior) -> (AuthorService, Arc<RecordingTm>) {
        let tm = Arc::new(RecordingTm::default());
        let svc = AuthorService::new(Arc::new(StubAuthorRepo { behavior }), tm.clone());
        (svc, tm)
    }

    #[tokio::test]
    async fn register_commits_once_on_success() {
        let (svc, tm) = service(Behavior::Succeed);

        let author = svc
            .register("Ann", "ann@example.com", "$argon2id$stub")
            .await
            .unwrap();

        assert_eq!(author.name, "Ann");
        assert_eq!(tm.commits.load(Ordering::SeqCst), 1);
        assert_eq!(tm.rollbacks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn register_duplicate_email_rolls_back() {
        let (svc, tm) = service(Behavior::DuplicateEmail);

        let err = svc
            .register("Ann", "ann@example.com", "$argon2id$stub")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Duplicate(_)));
        assert_eq!(tm.commits.load(Ordering::SeqCst), 0);
        assert_eq!(tm.rollbacks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delete_missing_author_is_not_found() {
        let (svc, tm) = service(Behavior::Missing);

        let err = svc.delete(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(tm.rollbacks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn change_password_reports_update_outcome() {
        let (svc, tm) = service(Behavior::Succeed);
        let id = Uuid::new_v4();

        let outcome = svc.change_password(id, "$argon2id$new").await.unwrap();

        assert_eq!(outcome.entity_id, id);
        assert_eq!(outcome.entity, EntityKind::Author);
        assert_eq!(outcome.action, ActionKind::Update);
        assert_eq!(tm.commits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reads_do_not_touch_the_transaction() {
        let (svc, tm) = service(Behavior::Succeed);

        let found = svc.get_by_id(Uuid::new_v4()).await.unwrap();

        assert!(found.is_some());
        assert_eq!(tm.commits.load(Ordering::SeqCst), 0);
        assert_eq!(tm.rollbacks.load(Ordering::SeqCst), 0);
    }
}
