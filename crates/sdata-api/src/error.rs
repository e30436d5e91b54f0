//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps store and engine errors to HTTP status codes with a JSON body of
//! error code, message, and optional details.
//!
//! A rejected write or validation returns 422 with the engine's report
//! string as the message, unchanged, so clients show the same wording the
//! engine produced.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sdata_schema::ValidationFailure;
use sdata_store::{RecordError, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Failure class and violations for rejected content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request fields failed basic checks (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// The engine rejected the submitted content (422).
    #[error(transparent)]
    Rejected(#[from] ValidationFailure),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) | Self::Rejected(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound(m) | Self::Validation(m) | Self::BadRequest(m) | Self::Conflict(m) => {
                m.clone()
            }
            Self::Rejected(failure) => failure.report(),
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        let Self::Rejected(failure) = self else {
            return None;
        };
        let mut details = serde_json::json!({ "kind": failure.kind() });
        if let ValidationFailure::Mismatch { violations, .. } = failure {
            details["violations"] = serde_json::to_value(violations).ok()?;
        }
        Some(details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.message(),
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Invalid(failure) => Self::Rejected(failure),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Duplicate { .. } => Self::Conflict(err.to_string()),
            StoreError::Record(record) => record.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use sdata_core::ParseError;
    use sdata_schema::{Violation, Violations};

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let missing = AppError::from(StoreError::NotFound {
            kind: "schema",
            name: "ghost".into(),
        });
        assert_eq!(missing.status_and_code().0, StatusCode::NOT_FOUND);

        let dup = AppError::from(StoreError::Duplicate {
            kind: "data",
            name: "k".into(),
        });
        assert_eq!(dup.status_and_code().0, StatusCode::CONFLICT);

        let required = AppError::from(StoreError::Record(RecordError::MissingField("key")));
        assert!(matches!(required, AppError::Validation(ref m) if m == "key is required"));
    }

    #[tokio::test]
    async fn rejected_content_carries_report_verbatim() {
        let failure = ValidationFailure::DataParse {
            error: ParseError::new("did not find expected node content"),
        };
        let (status, body) = response_parts(AppError::from(failure)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body.error.message,
            "Could not parse data: did not find expected node content"
        );
        assert_eq!(body.error.details.unwrap()["kind"], "data_parse");
    }

    #[tokio::test]
    async fn mismatch_details_list_violations() {
        let failure = ValidationFailure::Mismatch {
            schema_name: "person".into(),
            violations: Violations::new(vec![Violation {
                instance_path: "/age".into(),
                schema_path: "/properties/age/type".into(),
                message: "bad".into(),
            }]),
        };
        let (_, body) = response_parts(AppError::Rejected(failure)).await;
        let details = body.error.details.unwrap();
        assert_eq!(details["kind"], "mismatch");
        assert_eq!(details["violations"][0]["instance_path"], "/age");
    }

    #[tokio::test]
    async fn plain_errors_have_no_details() {
        let (status, body) = response_parts(AppError::NotFound("schema 'x' not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.message, "schema 'x' not found");
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("lock state".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
    }
}
