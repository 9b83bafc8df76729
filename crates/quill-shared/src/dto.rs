//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to exchange a refresh token for a new access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request to change the caller's password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// Request to create a new post (an unpublished draft).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub text: String,
}

/// Request to replace a post's text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub text: String,
}

/// Pagination query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    20
}

/// Response containing both authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a rotated access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// An author's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// An author row in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorSummaryResponse {
    pub name: String,
    pub email: String,
}

/// A full post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// A post row in a per-author listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummaryResponse {
    pub title: String,
    pub text: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// A published post with its author's summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedPostResponse {
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorSummaryResponse,
}

/// Confirmation of a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeResponse {
    pub entity_id: Uuid,
    pub message: String,
    pub entity: String,
    pub action: String,
}
