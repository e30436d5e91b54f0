//! # Ad Hoc Validation API
//!
//! `POST /v1/validate` checks data text against a stored schema (by name)
//! or inline schema text, without storing anything. The response is always
//! 200; `valid` and `error` carry the outcome.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use sdata_schema::{FailureKind, SchemaBinding, ValidationEngine};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Display name for inline schemas submitted without a name.
const INLINE_SCHEMA_NAME: &str = "inline";

/// Assemble the validation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/validate", post(validate))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// YAML or JSON data text.
    pub data: String,
    /// Stored schema to resolve, or the display name for `schema`.
    #[serde(default)]
    pub schema_name: Option<String>,
    /// Inline schema text. Takes precedence over a stored schema.
    #[serde(default)]
    pub schema: Option<String>,
}

impl Validate for ValidateRequest {
    fn validate(&self) -> Result<(), String> {
        if self.schema_name.is_none() && self.schema.is_none() {
            return Err("one of schema_name or schema is required".to_string());
        }
        Ok(())
    }
}

impl ValidateRequest {
    fn binding(&self) -> SchemaBinding {
        match (&self.schema, &self.schema_name) {
            (Some(text), name) => SchemaBinding::inline(
                name.as_deref().unwrap_or(INLINE_SCHEMA_NAME),
                text.as_str(),
            ),
            (None, Some(name)) => SchemaBinding::named(name.as_str()),
            (None, None) => SchemaBinding::named(""),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn validate(
    State(state): State<AppState>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let outcome = req
        .binding()
        .validate(&ValidationEngine::new(), &req.data, &state.store);
    tracing::debug!(valid = outcome.is_valid(), "ad hoc validation");
    Ok(Json(ValidateResponse {
        valid: outcome.is_valid(),
        kind: outcome.failure().map(|f| f.kind()),
        error: outcome.report(),
    }))
}
