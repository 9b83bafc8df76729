//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::ApiResponse;
use quill_shared::dto::{
    AuthorSummaryResponse, CreatePostRequest, OutcomeResponse, PageQuery, PostResponse,
    PostSummaryResponse, PublishedPostResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: quill_core::domain::Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        is_published: post.is_published,
        created_at: post.created_at,
        author_id: post.author_id,
    }
}

fn outcome_response(outcome: quill_core::domain::Outcome) -> OutcomeResponse {
    OutcomeResponse {
        entity_id: outcome.entity_id,
        message: outcome.message,
        entity: outcome.entity.as_str().to_string(),
        action: outcome.action.as_str().to_string(),
    }
}

/// GET /api/posts - published posts, newest first.
pub async fn list_published(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .post_service()
        .list_published(query.skip, query.limit)
        .await?;

    let rows: Vec<PublishedPostResponse> = posts
        .into_iter()
        .map(|p| PublishedPostResponse {
            title: p.title,
            text: p.text,
            created_at: p.created_at,
            author: AuthorSummaryResponse {
                name: p.author.name,
                email: p.author.email,
            },
        })
        .collect();

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .post_service()
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/posts - creates an unpublished draft owned by the caller.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }

    let post = state
        .post_service()
        .create(&req.title, &req.text, identity.author_id)
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PATCH /api/posts/{id}
pub async fn update_text(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let summary = state
        .post_service()
        .update_text(path.into_inner(), identity.author_id, &body.text)
        .await?;

    Ok(HttpResponse::Ok().json(PostSummaryResponse {
        title: summary.title,
        text: summary.text,
        is_published: summary.is_published,
        created_at: summary.created_at,
        author_id: summary.author_id,
    }))
}

/// DELETE /api/posts/{id} - soft delete, owner only.
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let outcome = state
        .post_service()
        .delete(path.into_inner(), identity.author_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::completed(outcome_response(outcome))))
}

/// POST /api/posts/{id}/publish
pub async fn publish(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let outcome = state
        .post_service()
        .set_published(path.into_inner(), identity.author_id, true)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::completed(outcome_response(outcome))))
}

/// POST /api/posts/{id}/unpublish
pub async fn unpublish(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let outcome = state
        .post_service()
        .set_published(path.into_inner(), identity.author_id, false)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::completed(outcome_response(outcome))))
}
