use std::sync::Arc;

use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

use quill_core::domain::ActionKind;
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, PostRepository, TransactionManager};

use crate::database::entity::{author, post};
use crate::database::{DbSession, SeaOrmAuthorRepository, SeaOrmPostRepository,
    SessionTransactionManager};

fn author_model(id: uuid::Uuid) -> author::Model {
    author::Model {
        id,
        name: "Ann".to_owned(),
        email: "ann@example.com".to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
    }
}

fn post_model(id: uuid::Uuid, author_id: uuid::Uuid) -> post::Model {
    post::Model {
        id,
        title: "Test Post".to_owned(),
        text: "Content".to_owned(),
        is_published: true,
        is_deleted: false,
        created_at: chrono::Utc::now().into(),
        author_id,
    }
}

#[tokio::test]
async fn test_find_author_by_id() {
    let author_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![author_model(author_id)]])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmAuthorRepository::new(session);

    let result = repo.get_by_id(author_id).await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.id, author_id);
    assert_eq!(found.email, "ann@example.com");
}

#[tokio::test]
async fn test_find_absent_author_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<author::Model>::new()])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmAuthorRepository::new(session);

    let result = repo.get_by_id(uuid::Uuid::new_v4()).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_duplicate_email_maps_to_constraint() {
    let duplicate = || {
        DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"authors_email_key\"".to_owned(),
        ))
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_errors(vec![duplicate()])
        .append_query_errors(vec![duplicate()])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmAuthorRepository::new(session);

    let err = repo
        .create(uuid::Uuid::new_v4(), "Ann", "ann@example.com", "$argon2id$stub")
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_delete_author_zero_rows_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmAuthorRepository::new(session);

    let err = repo.delete(uuid::Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_published_listing_maps_joined_author_rows() {
    let author_id = uuid::Uuid::new_v4();

    let mut newer = post_model(uuid::Uuid::new_v4(), author_id);
    newer.title = "Newer".to_owned();
    let mut older = post_model(uuid::Uuid::new_v4(), author_id);
    older.title = "Older".to_owned();
    older.created_at = (chrono::Utc::now() - chrono::TimeDelta::hours(1)).into();

    // rows arrive already ordered by the query; the mapping keeps that order
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            (newer, author_model(author_id)),
            (older, author_model(author_id)),
        ]])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmPostRepository::new(session);

    let listed = repo.list_published(0, 10).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Newer");
    assert_eq!(listed[1].title, "Older");
    assert!(listed[0].created_at > listed[1].created_at);
    assert!(listed.iter().all(|p| p.author.email == "ann@example.com"));
}

#[tokio::test]
async fn test_delete_post_wrong_owner_is_classified() {
    let post_id = uuid::Uuid::new_v4();
    let owner = uuid::Uuid::new_v4();
    let intruder = uuid::Uuid::new_v4();

    // the soft-delete matches nothing, the classification read finds the
    // post under its real owner
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .append_query_results(vec![vec![post_model(post_id, owner)]])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmPostRepository::new(session);

    let err = repo.delete(post_id, intruder).await.unwrap_err();

    assert!(matches!(err, RepoError::WrongOwner));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmPostRepository::new(session);

    let err = repo
        .delete(uuid::Uuid::new_v4(), uuid::Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_post_then_commit() {
    let post_id = uuid::Uuid::new_v4();
    let owner = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmPostRepository::new(session.clone());
    let tm = SessionTransactionManager::new(session);

    let outcome = repo.delete(post_id, owner).await.unwrap();
    tm.commit().await.unwrap();

    assert_eq!(outcome.entity_id, post_id);
    assert_eq!(outcome.action, ActionKind::Delete);
}

#[tokio::test]
async fn test_update_text_returns_fresh_summary() {
    let post_id = uuid::Uuid::new_v4();
    let owner = uuid::Uuid::new_v4();

    let mut updated = post_model(post_id, owner);
    updated.text = "rewritten".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results(vec![vec![updated]])
        .into_connection();

    let session = Arc::new(DbSession::new(db));
    let repo = SeaOrmPostRepository::new(session);

    let summary = repo.update_text(post_id, owner, "rewritten").await.unwrap();

    assert_eq!(summary.text, "rewritten");
    assert_eq!(summary.author_id, owner);
}

#[tokio::test]
async fn test_commit_without_writes_is_a_no_op() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let session = Arc::new(DbSession::new(db));
    let tm = SessionTransactionManager::new(session);

    tm.commit().await.unwrap();
    tm.rollback().await.unwrap();
}
