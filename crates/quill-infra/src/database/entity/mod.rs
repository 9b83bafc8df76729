//! sea-orm entities and their domain conversions.

pub mod author;
pub mod post;
