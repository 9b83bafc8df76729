use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthorSummary;

/// Post entity - a blog post owned by a single author.
///
/// Posts are never physically deleted; `is_deleted` hides them from every
/// read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub is_published: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// Post projection returned by per-author listings and text updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub text: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub author_id: Uuid,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            text: post.text,
            is_published: post.is_published,
            created_at: post.created_at,
            author_id: post.author_id,
        }
    }
}

/// A published post joined with its author's public summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedPost {
    pub title: String,
    pub text: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub author: AuthorSummary,
}
