//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::ports::{PasswordHasher, TokenCodec};
use quill_shared::dto::{
    AccessTokenResponse, AuthResponse, AuthorResponse, LoginRequest, RefreshRequest,
    RegisterRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn token_pair(
    codec: &Arc<dyn TokenCodec>,
    author_id: uuid::Uuid,
) -> AppResult<AuthResponse> {
    let access_token = codec.issue_access_token(author_id)?;
    let refresh_token = codec.issue_refresh_token(author_id)?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: codec.access_token_ttl_seconds() as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    codec: web::Data<Arc<dyn TokenCodec>>,
    hasher: web::Data<Arc<dyn PasswordHasher>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Hash password
    let password_hash = hasher
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create author; a duplicate email surfaces as 409 through the
    // service's Duplicate error
    let author = state
        .author_service()
        .register(&req.name, &req.email, &password_hash)
        .await?;

    let tokens = token_pair(codec.get_ref(), author.id)?;
    Ok(HttpResponse::Created().json(tokens))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    codec: web::Data<Arc<dyn TokenCodec>>,
    hasher: web::Data<Arc<dyn PasswordHasher>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find author by email
    let author = state
        .author_service()
        .get_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    if !hasher.verify(&req.password, &author.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let tokens = token_pair(codec.get_ref(), author.id)?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// POST /api/auth/refresh
///
/// Exchanges a valid refresh token for a fresh access token. The refresh
/// token stays usable until it expires.
pub async fn refresh(
    codec: web::Data<Arc<dyn TokenCodec>>,
    body: web::Json<RefreshRequest>,
) -> AppResult<HttpResponse> {
    let access_token = codec.rotate_refresh_token(&body.refresh_token)?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: codec.access_token_ttl_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let author = state
        .author_service()
        .get_by_id(identity.author_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(AuthorResponse {
        id: author.id,
        name: author.name,
        email: author.email,
    }))
}
