//! JWT token codec implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::ports::{TokenCodec, TokenError, TokenScope};

/// JWT codec configuration. Access tokens default to 30 minutes, refresh
/// tokens to 10 hours.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            issuer: "quill-api".to_string(),
            access_ttl_minutes: 30,
            refresh_ttl_hours: 10,
        }
    }
}

/// JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // author_id
    scope: TokenScope,
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// JWT-based token codec. Stateless; verification is pure.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenCodec {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        // Warn if using default secret in production
        if secret == "change-me-in-production" {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let defaults = JwtConfig::default();
        let config = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            access_ttl_minutes: positive_or_default(
                std::env::var("JWT_ACCESS_TTL_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok()),
                defaults.access_ttl_minutes,
                "JWT_ACCESS_TTL_MINUTES",
            ),
            refresh_ttl_hours: positive_or_default(
                std::env::var("JWT_REFRESH_TTL_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok()),
                defaults.refresh_ttl_hours,
                "JWT_REFRESH_TTL_HOURS",
            ),
        };
        Self::new(config)
    }

    fn issue(
        &self,
        author_id: Uuid,
        scope: TokenScope,
        ttl: TimeDelta,
    ) -> Result<String, TokenError> {
        let now = Utc::now();

        let claims = Claims {
            sub: author_id.to_string(),
            scope,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// Decode a token, insisting on the expected scope.
    ///
    /// Expiry is checked during decode with zero leeway, so an expired token
    /// reports `Expired` before its scope is ever looked at.
    fn decode_scoped(&self, token: &str, expected: TokenScope) -> Result<Uuid, TokenError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        if token_data.claims.scope != expected {
            return Err(TokenError::WrongScope);
        }

        Uuid::parse_str(&token_data.claims.sub).map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

/// A non-positive TTL would mint tokens already expired at issue time, so a
/// misconfigured environment value falls back to the default.
fn positive_or_default(parsed: Option<i64>, default: i64, var: &str) -> i64 {
    match parsed {
        Some(v) if v > 0 => v,
        Some(v) => {
            tracing::warn!("{} = {} is not a positive duration, using {}", var, v, default);
            default
        }
        None => default,
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue_access_token(&self, author_id: Uuid) -> Result<String, TokenError> {
        self.issue(
            author_id,
            TokenScope::Access,
            TimeDelta::minutes(self.config.access_ttl_minutes),
        )
    }

    fn issue_refresh_token(&self, author_id: Uuid) -> Result<String, TokenError> {
        self.issue(
            author_id,
            TokenScope::Refresh,
            TimeDelta::hours(self.config.refresh_ttl_hours),
        )
    }

    fn verify_access_token(&self, token: &str) -> Result<Uuid, TokenError> {
        self.decode_scoped(token, TokenScope::Access)
    }

    fn rotate_refresh_token(&self, token: &str) -> Result<String, TokenError> {
        let author_id = self.decode_scoped(token, TokenScope::Refresh)?;
        self.issue_access_token(author_id)
    }

    fn access_token_ttl_seconds(&self) -> i64 {
        self.config.access_ttl_minutes * 60
    }
}
