//! Repository ports - one capability contract per stored entity.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Author, AuthorSummary, Outcome, Post, PostSummary, PublishedPost};
use crate::error::RepoError;

/// Author persistence operations.
///
/// Reads return `Ok(None)` for absent rows; writes that match zero rows fail
/// with [`RepoError::NotFound`].
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<Author>, RepoError>;

    /// Pure pagination over all authors, storage default order.
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<AuthorSummary>, RepoError>;

    /// Insert a new author. The id is pre-generated by the caller; a
    /// duplicate email surfaces as [`RepoError::Constraint`].
    async fn create(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Author, RepoError>;

    /// Physically delete an author.
    async fn delete(&self, id: Uuid) -> Result<Outcome, RepoError>;

    async fn change_password(&self, id: Uuid, password_hash: &str)
    -> Result<Outcome, RepoError>;
}

/// Post persistence operations.
///
/// Ownership is enforced inside the mutating query predicate (id + author id
/// + not-deleted), never as a separate check-then-act step. A predicate miss
/// is reported as [`RepoError::NotFound`] when the post is absent or already
/// deleted, and [`RepoError::WrongOwner`] when it exists under another author.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch a post by id, excluding soft-deleted rows.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Published, non-deleted posts joined with their author, newest first.
    async fn list_published(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<PublishedPost>, RepoError>;

    /// Posts of one author. Soft-deleted rows are always excluded; drafts
    /// are included only when `include_hidden` is set (the viewer is the
    /// owning author).
    async fn list_by_author(
        &self,
        author_id: Uuid,
        skip: u64,
        limit: u64,
        include_hidden: bool,
    ) -> Result<Vec<PostSummary>, RepoError>;

    /// Insert a new post as an unpublished draft. Id pre-generated by the
    /// caller.
    async fn create(
        &self,
        id: Uuid,
        title: &str,
        text: &str,
        author_id: Uuid,
    ) -> Result<Post, RepoError>;

    /// Soft-delete a post owned by `author_id`.
    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<Outcome, RepoError>;

    /// Replace the text of a post owned by `author_id`.
    async fn update_text(
        &self,
        id: Uuid,
        author_id: Uuid,
        new_text: &str,
    ) -> Result<PostSummary, RepoError>;

    /// Publish or unpublish a post owned by `author_id`.
    async fn set_published(
        &self,
        id: Uuid,
        author_id: Uuid,
        published: bool,
    ) -> Result<Outcome, RepoError>;
}
