//! sea-orm post repository.
//!
//! Ownership lives inside every mutating predicate (id + author id +
//! not-deleted), so a concurrent delete or a foreign author can never slip
//! between a check and the write. When a predicate matches zero rows, a
//! follow-up read inside the same transaction tells "absent" apart from
//! "someone else's post" for error reporting only.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use quill_core::domain::{
    ActionKind, AuthorSummary, EntityKind, Outcome, Post, PostSummary, PublishedPost,
};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::author::Entity as AuthorEntity;
use super::entity::post::{self, Entity as PostEntity};
use super::map_db_err;
use super::session::DbSession;

/// Post repository bound to one request session.
pub struct SeaOrmPostRepository {
    session: Arc<DbSession>,
}

impl SeaOrmPostRepository {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }
}

/// Classify a zero-rows-affected write against the current state.
async fn classify_miss(
    txn: &DatabaseTransaction,
    id: Uuid,
    author_id: Uuid,
) -> Result<RepoError, RepoError> {
    let existing = PostEntity::find()
        .filter(post::Column::Id.eq(id))
        .filter(post::Column::IsDeleted.eq(false))
        .one(txn)
        .await
        .map_err(map_db_err)?;

    Ok(match existing {
        Some(model) if model.author_id != author_id => RepoError::WrongOwner,
        // absent, already deleted, or deleted between the write and this read
        _ => RepoError::NotFound,
    })
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let guard = self.session.acquire().await?;

        let found = PostEntity::find()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::IsDeleted.eq(false))
            .one(guard.txn()?)
            .await
            .map_err(map_db_err)?;

        Ok(found.map(Into::into))
    }

    async fn list_published(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<PublishedPost>, RepoError> {
        let guard = self.session.acquire().await?;

        let rows = PostEntity::find()
            .find_also_related(AuthorEntity)
            .filter(post::Column::IsPublished.eq(true))
            .filter(post::Column::IsDeleted.eq(false))
            .order_by_desc(post::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(guard.txn()?)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(|(model, author)| {
                let author = author.ok_or_else(|| {
                    RepoError::Query(format!("post {} has no author row", model.id))
                })?;
                Ok(PublishedPost {
                    title: model.title,
                    text: model.text,
                    is_published: model.is_published,
                    created_at: model.created_at.into(),
                    author: AuthorSummary::from(author),
                })
            })
            .collect()
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        skip: u64,
        limit: u64,
        include_hidden: bool,
    ) -> Result<Vec<PostSummary>, RepoError> {
        let guard = self.session.acquire().await?;

        let mut query = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .filter(post::Column::IsDeleted.eq(false));

        if !include_hidden {
            query = query.filter(post::Column::IsPublished.eq(true));
        }

        let rows = query
            .order_by_desc(post::Column::CreatedAt)
            .offset(skip)
            .limit(limit)
            .all(guard.txn()?)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(
        &self,
        id: Uuid,
        title: &str,
        text: &str,
        author_id: Uuid,
    ) -> Result<Post, RepoError> {
        let guard = self.session.acquire().await?;

        let model = post::ActiveModel {
            id: Set(id),
            title: Set(title.to_owned()),
            text: Set(text.to_owned()),
            is_published: Set(false),
            is_deleted: Set(false),
            created_at: Set(Utc::now().into()),
            author_id: Set(author_id),
        };

        let created = model.insert(guard.txn()?).await.map_err(map_db_err)?;

        Ok(created.into())
    }

    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<Outcome, RepoError> {
        let guard = self.session.acquire().await?;
        let txn = guard.txn()?;

        let result = PostEntity::update_many()
            .col_expr(post::Column::IsDeleted, Expr::value(true))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(author_id))
            .filter(post::Column::IsDeleted.eq(false))
            .exec(txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(classify_miss(txn, id, author_id).await?);
        }

        Ok(Outcome::new(id, EntityKind::Post, ActionKind::Delete))
    }

    async fn update_text(
        &self,
        id: Uuid,
        author_id: Uuid,
        new_text: &str,
    ) -> Result<PostSummary, RepoError> {
        let guard = self.session.acquire().await?;
        let txn = guard.txn()?;

        let result = PostEntity::update_many()
            .col_expr(post::Column::Text, Expr::value(new_text.to_owned()))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(author_id))
            .filter(post::Column::IsDeleted.eq(false))
            .exec(txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(classify_miss(txn, id, author_id).await?);
        }

        let updated = PostEntity::find()
            .filter(post::Column::Id.eq(id))
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        Ok(updated.into())
    }

    async fn set_published(
        &self,
        id: Uuid,
        author_id: Uuid,
        published: bool,
    ) -> Result<Outcome, RepoError> {
        let guard = self.session.acquire().await?;
        let txn = guard.txn()?;

        let result = PostEntity::update_many()
            .col_expr(post::Column::IsPublished, Expr::value(published))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(author_id))
            .filter(post::Column::IsDeleted.eq(false))
            .exec(txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(classify_miss(txn, id, author_id).await?);
        }

        let action = if published {
            ActionKind::Update
        } else {
            ActionKind::Cancel
        };

        Ok(Outcome::new(id, EntityKind::Post, action))
    }
}
