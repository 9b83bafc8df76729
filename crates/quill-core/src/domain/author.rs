use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author entity - an account that owns posts.
///
/// The id is generated once at registration and never reused; email
/// uniqueness is enforced by storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public author projection returned by listings and embedded in
/// published-post rows. Carries no credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub name: String,
    pub email: String,
}

impl From<Author> for AuthorSummary {
    fn from(author: Author) -> Self {
        Self {
            name: author.name,
            email: author.email,
        }
    }
}
