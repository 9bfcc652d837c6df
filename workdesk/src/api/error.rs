//! # API Errors
//!
//! Maps validation and store failures onto HTTP responses. Every error body
//! has the shape `{"detail": ...}`: a list of field errors for rejected
//! input, a message string otherwise.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use workdesk_core::error::StoreError;
use workdesk_core::validate::{FieldError, ValidationError, Violation};

/// Longest store error message echoed back in a 500 body.
const DETAIL_LIMIT: usize = 200;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body or query string failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The document store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(StoreError::InvalidQuery(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::malformed_body(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(ValidationError::single(FieldError::new(
            "query",
            Violation::WrongType,
            rejection.body_text(),
        )))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Fields(Vec<FieldError>),
    Message(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match self {
            ApiError::Validation(err) => {
                warn!(error = %err, "rejected request");
                ErrorDetail::Fields(err.errors().to_vec())
            }
            ApiError::Store(err) => {
                error!(error = %err, "store operation failed");
                ErrorDetail::Message(truncate(&err.to_string(), DETAIL_LIMIT))
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Cuts `message` to at most `max_chars` characters.
pub(crate) fn truncate(message: &str, max_chars: usize) -> String {
    match message.char_indices().nth(max_chars) {
        Some((end, _)) => message[..end].to_string(),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let validation = ValidationError::single(FieldError::missing("name"));

        assert_eq!(
            ApiError::from(validation).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(StoreError::Backend("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(StoreError::Unavailable("down".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(StoreError::InvalidQuery("no such field".to_string())).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("héllo wörld", 5), "héllo");
        assert_eq!(truncate("short", 50), "short");
    }

    #[test]
    fn test_detail_shapes() {
        let fields = ErrorResponse {
            detail: ErrorDetail::Fields(vec![FieldError::missing("title")]),
        };
        let message = ErrorResponse {
            detail: ErrorDetail::Message("Backend error: timeout".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            serde_json::json!({ "detail": [{ "field": "title", "type": "missing", "msg": "field required" }] })
        );
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({ "detail": "Backend error: timeout" })
        );
    }
}
