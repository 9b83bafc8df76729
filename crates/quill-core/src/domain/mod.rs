//! Domain entities - the core business objects.

mod author;
mod outcome;
mod post;

pub use author::{Author, AuthorSummary};
pub use outcome::{ActionKind, EntityKind, Outcome};
pub use post::{Post, PostSummary, PublishedPost};
