//! Response envelopes: a success wrapper and RFC 7807 problem details.

use serde::{Deserialize, Serialize};

use crate::dto::OutcomeResponse;

/// Successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<OutcomeResponse> {
    /// Wrap a write confirmation, surfacing its message at the envelope level.
    pub fn completed(outcome: OutcomeResponse) -> Self {
        let message = format!("{} {} {}", outcome.entity, outcome.action, outcome.message);
        Self {
            success: true,
            data: Some(outcome),
            message: Some(message),
        }
    }
}

/// RFC 7807 Problem Details for HTTP APIs.
///
/// The `type` member is a relative reference naming the problem class; every
/// class this API reports has a constructor below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    fn new(status: u16, problem: &str, title: impl Into<String>) -> Self {
        Self {
            error_type: format!("/problems/{problem}"),
            title: title.into(),
            status,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "invalid-request", "Bad Request").with_detail(detail)
    }

    /// 401 with a caller-facing title; used for every credential and token
    /// rejection so the title alone tells them apart.
    pub fn authentication(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(401, "authentication", title).with_detail(detail)
    }

    pub fn forbidden() -> Self {
        Self::new(403, "ownership", "Forbidden")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "missing-entity", "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "duplicate-entity", "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "internal", "Internal Server Error")
    }
}
