//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};
use std::sync::Arc;

use quill_core::ports::{TokenCodec, TokenError};

/// Authenticated author identity extractor.
///
/// Use this in handlers to require a valid access token:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, author {}!", identity.author_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub author_id: uuid::Uuid,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub enum AuthenticationError {
    MissingAuth,
    MalformedHeader,
    Token(TokenError),
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticationError::MissingAuth => write!(f, "Missing authorization header"),
            AuthenticationError::MalformedHeader => write!(f, "Malformed authorization header"),
            AuthenticationError::Token(e) => write!(f, "{}", e),
        }
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use quill_shared::ErrorResponse;

        let error = match self {
            AuthenticationError::MissingAuth => ErrorResponse::authentication(
                "Authentication Required",
                "Please provide a valid Bearer token in the Authorization header.",
            ),
            AuthenticationError::MalformedHeader => {
                ErrorResponse::authentication("Invalid Token", "Expected a Bearer token.")
            }
            AuthenticationError::Token(TokenError::Expired) => ErrorResponse::authentication(
                "Token Expired",
                "Your access token has expired. Refresh it or login again.",
            ),
            AuthenticationError::Token(TokenError::WrongScope) => ErrorResponse::authentication(
                "Wrong Token Scope",
                "This endpoint requires an access token.",
            ),
            AuthenticationError::Token(TokenError::Invalid(msg)) => {
                ErrorResponse::authentication("Invalid Token", msg.clone())
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Get token codec from app data
        let codec = match req.app_data::<actix_web::web::Data<Arc<dyn TokenCodec>>>() {
            Some(codec) => codec,
            None => {
                tracing::error!("TokenCodec not found in app data");
                return ready(Err(AuthenticationError::Token(TokenError::Invalid(
                    "Server configuration error".to_string(),
                ))));
            }
        };

        // Extract Bearer token from Authorization header
        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value,
            None => return ready(Err(AuthenticationError::MissingAuth)),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => return ready(Err(AuthenticationError::MalformedHeader)),
        };

        // Parse "Bearer <token>"
        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => return ready(Err(AuthenticationError::MalformedHeader)),
        };

        // Validate token
        match codec.verify_access_token(token) {
            Ok(author_id) => ready(Ok(Identity { author_id })),
            Err(e) => ready(Err(AuthenticationError::Token(e))),
        }
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => ready(Ok(OptionalIdentity(Some(identity)))),
            Err(_) => ready(Ok(OptionalIdentity(None))),
        }
    }
}
