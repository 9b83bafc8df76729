//! Author handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use quill_core::ports::PasswordHasher;
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AuthorResponse, AuthorSummaryResponse, ChangePasswordRequest, OutcomeResponse, PageQuery,
    PostSummaryResponse,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn outcome_response(outcome: quill_core::domain::Outcome) -> OutcomeResponse {
    OutcomeResponse {
        entity_id: outcome.entity_id,
        message: outcome.message,
        entity: outcome.entity.as_str().to_string(),
        action: outcome.action.as_str().to_string(),
    }
}

/// GET /api/authors
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let authors = state.author_service().list(query.skip, query.limit).await?;

    let rows: Vec<AuthorSummaryResponse> = authors
        .into_iter()
        .map(|a| AuthorSummaryResponse {
            name: a.name,
            email: a.email,
        })
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/authors/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let author = state
        .author_service()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("author with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(AuthorResponse {
        id: author.id,
        name: author.name,
        email: author.email,
    }))
}

/// DELETE /api/authors/{id} - an author may only delete themselves.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if identity.author_id != id {
        return Err(AppError::Forbidden);
    }

    let outcome = state.author_service().delete(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::completed(outcome_response(outcome))))
}

/// PUT /api/authors/{id}/password - an author may only change their own.
pub async fn change_password(
    state: web::Data<AppState>,
    hasher: web::Data<Arc<dyn PasswordHasher>>,
    path: web::Path<Uuid>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if identity.author_id != id {
        return Err(AppError::Forbidden);
    }

    if body.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = hasher
        .hash(&body.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let outcome = state
        .author_service()
        .change_password(id, &password_hash)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::completed(outcome_response(outcome))))
}

/// GET /api/authors/{id}/posts
///
/// Drafts are visible only when the caller is the listed author; everyone
/// else sees published posts only.
pub async fn list_posts(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let author_id = path.into_inner();
    let include_hidden = identity
        .0
        .is_some_and(|identity| identity.author_id == author_id);

    let posts = state
        .post_service()
        .list_by_author(author_id, query.skip, query.limit, include_hidden)
        .await?;

    let rows: Vec<PostSummaryResponse> = posts
        .into_iter()
        .map(|p| PostSummaryResponse {
            title: p.title,
            text: p.text,
            is_published: p.is_published,
            created_at: p.created_at,
            author_id: p.author_id,
        })
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}
