//! # Request Bodies
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so that a body serde
//! cannot decode becomes a 400 in the service's own error shape instead of
//! axum's plain-text rejection.
//!
//! Schema and data text inside a well-formed body is never checked here.
//! That is the engine's job, and its failures are 422s. [`Validate`] only
//! covers request shape that serde cannot express, such as "one of
//! `schema_name` or `schema`" on `/v1/validate`.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Shape rules for a request body beyond its field types.
pub trait Validate {
    /// Describe the first rule the body breaks.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a decoded body, turning a rejection into [`AppError::BadRequest`]
/// with axum's description of what was wrong.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// [`extract_json`], then the body's [`Validate`] rules. A broken rule is
/// also a 400: the request is malformed, not its content.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let body = extract_json(result)?;
    body.validate().map_err(AppError::BadRequest)?;
    Ok(body)
}
