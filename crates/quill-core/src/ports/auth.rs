//! Authentication ports: token codec and password hashing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker distinguishing an access token from a refresh token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    Access,
    Refresh,
}

/// Token verification failures.
///
/// Unlike repository errors these always propagate to the caller with their
/// distinct kind, so the transport layer can answer precisely.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,

    #[error("Wrong token scope")]
    WrongScope,
}

/// Password hashing failures (bad parameters or hash encoding).
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("Hashing error: {0}")]
    Hash(String),
}

/// Issues and verifies signed, time-limited, scoped tokens.
///
/// Verification is pure and synchronous: no shared mutable state, safe from
/// any number of concurrent callers.
pub trait TokenCodec: Send + Sync {
    /// Mint an access token (scope `access`) for an author.
    fn issue_access_token(&self, author_id: Uuid) -> Result<String, TokenError>;

    /// Mint a refresh token (scope `refresh`) for an author.
    fn issue_refresh_token(&self, author_id: Uuid) -> Result<String, TokenError>;

    /// Verify an access token and return its subject.
    fn verify_access_token(&self, token: &str) -> Result<Uuid, TokenError>;

    /// Verify a refresh token and mint a fresh access token for its subject.
    ///
    /// The refresh token itself stays valid until it expires; there is no
    /// revocation list.
    fn rotate_refresh_token(&self, token: &str) -> Result<String, TokenError>;

    /// Lifetime of newly minted access tokens, for `expires_in` responses.
    fn access_token_ttl_seconds(&self) -> i64;
}

/// One-way, salted password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Check a password against a stored hash. Never errors: a malformed
    /// hash verifies as `false`, same as a wrong password.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
