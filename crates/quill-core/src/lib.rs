//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, error types, the ports that infrastructure implements, and the
//! services that orchestrate repositories behind a transaction boundary.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
