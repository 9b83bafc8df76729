use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Outcome, Post, PostSummary, PublishedPost};
use crate::error::DomainError;
use crate::ports::{PostRepository, TransactionManager};

use super::{finish_write, read_error};

const ENTITY: &str = "post";

/// Post CRUD over one repository and one unit of work.
///
/// Ownership is never checked here: the repository folds the author id into
/// every mutating predicate, which is atomic and race-free.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    tm: Arc<dyn TransactionManager>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, tm: Arc<dyn TransactionManager>) -> Self {
        Self { repo, tm }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| read_error(ENTITY, e))
    }

    pub async fn list_published(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<PublishedPost>, DomainError> {
        self.repo
            .list_published(skip, limit)
            .await
            .map_err(|e| read_error(ENTITY, e))
    }

    pub async fn list_by_author(
        &self,
        author_id: Uuid,
        skip: u64,
        limit: u64,
        include_hidden: bool,
    ) -> Result<Vec<PostSummary>, DomainError> {
        self.repo
            .list_by_author(author_id, skip, limit, include_hidden)
            .await
            .map_err(|e| read_error(ENTITY, e))
    }

    /// Create an unpublished draft under a freshly generated id.
    pub async fn create(
        &self,
        title: &str,
        text: &str,
        author_id: Uuid,
    ) -> Result<Post, DomainError> {
        let id = Uuid::new_v4();
        let result = self.repo.create(id, title, text, author_id).await;
        finish_write(&self.tm, ENTITY, id, result).await
    }

    pub async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<Outcome, DomainError> {
        let result = self.repo.delete(id, author_id).await;
        finish_write(&self.tm, ENTITY, id, result).await
    }

    pub async fn update_text(
        &self,
        id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<PostSummary, DomainError> {
        let result = self.repo.update_text(id, author_id, text).await;
        finish_write(&self.tm, ENTITY, id, result).await
    }

    pub async fn set_published(
        &self,
        id: Uuid,
        author_id: Uuid,
        published: bool,
    ) -> Result<Outcome, DomainError> {
        let result = self.repo.set_published(id, author_id, published).await;
        finish_write(&self.tm, ENTITY, id, result).await
    }
}
