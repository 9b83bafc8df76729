//! sea-orm author repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use uuid::Uuid;

use quill_core::domain::{ActionKind, Author, AuthorSummary, EntityKind, Outcome};
use quill_core::error::RepoError;
use quill_core::ports::AuthorRepository;

use super::entity::author::{self, Entity as AuthorEntity};
use super::map_db_err;
use super::session::DbSession;

/// Author repository bound to one request session.
pub struct SeaOrmAuthorRepository {
    session: Arc<DbSession>,
}

impl SeaOrmAuthorRepository {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Author>, RepoError> {
        let guard = self.session.acquire().await?;

        let found = AuthorEntity::find_by_id(id)
            .one(guard.txn()?)
            .await
            .map_err(map_db_err)?;

        Ok(found.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Author>, RepoError> {
        let guard = self.session.acquire().await?;

        let found = AuthorEntity::find()
            .filter(author::Column::Email.eq(email))
            .one(guard.txn()?)
            .await
            .map_err(map_db_err)?;

        Ok(found.map(Into::into))
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<AuthorSummary>, RepoError> {
        let guard = self.session.acquire().await?;

        let rows = AuthorEntity::find()
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
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Author, RepoError> {
        let guard = self.session.acquire().await?;

        let model = author::ActiveModel {
            id: Set(id),
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash.to_owned()),
        };

        let created = model.insert(guard.txn()?).await.map_err(map_db_err)?;

        Ok(created.into())
    }

    async fn delete(&self, id: Uuid) -> Result<Outcome, RepoError> {
        let guard = self.session.acquire().await?;

        let result = AuthorEntity::delete_by_id(id)
            .exec(guard.txn()?)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(Outcome::new(id, EntityKind::Author, ActionKind::Delete))
    }

    async fn change_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Outcome, RepoError> {
        let guard = self.session.acquire().await?;

        let result = AuthorEntity::update_many()
            .col_expr(
                author::Column::PasswordHash,
                Expr::value(password_hash.to_owned()),
            )
            .filter(author::Column::Id.eq(id))
            .exec(guard.txn()?)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(Outcome::new(id, EntityKind::Author, ActionKind::Update))
    }
}
