//! # Schema Record API
//!
//! - `GET    /v1/schemas`        : List schema records
//! - `POST   /v1/schemas`        : Create a schema record (self-checked)
//! - `POST   /v1/schema-check`   : Self-check a definition without storing it
//! - `GET    /v1/schemas/{name}` : Fetch a schema record
//! - `PUT    /v1/schemas/{name}` : Replace a definition (self-checked)
//! - `DELETE /v1/schemas/{name}` : Delete a schema record

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use sdata_schema::SelfCheck;
use sdata_store::SchemaRecord;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::AppState;

/// Assemble the schema router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/schemas", get(list_schemas).post(create_schema))
        .route("/v1/schema-check", post(check_schema))
        .route(
            "/v1/schemas/{name}",
            get(get_schema).put(update_schema).delete(delete_schema),
        )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSchemaRequest {
    pub name: String,
    /// YAML or JSON schema text.
    pub definition: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSchemaRequest {
    pub definition: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckSchemaRequest {
    /// Display name used in reports. Defaults to `schema`.
    #[serde(default)]
    pub name: Option<String>,
    pub definition: String,
}

impl Validate for CheckSchemaRequest {
    fn validate(&self) -> Result<(), String> {
        if self.definition.trim().is_empty() {
            return Err("definition must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckSchemaResponse {
    pub accepted: bool,
    /// Self-check state label, e.g. `accepted` or `rejected_parse_failure`.
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

async fn list_schemas(State(state): State<AppState>) -> Json<Vec<SchemaRecord>> {
    Json(state.store.list_schemas())
}

async fn create_schema(
    State(state): State<AppState>,
    body: Result<Json<CreateSchemaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SchemaRecord>), AppError> {
    let req = extract_json(body)?;
    let record = state.store.create_schema(&req.name, &req.definition)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn check_schema(
    body: Result<Json<CheckSchemaRequest>, JsonRejection>,
) -> Result<Json<CheckSchemaResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let name = req.name.as_deref().unwrap_or("schema");
    let mut check = SelfCheck::new();
    let outcome = check.run(&req.definition, name);
    Ok(Json(CheckSchemaResponse {
        accepted: outcome.is_accepted(),
        state: outcome.label().to_string(),
        error: outcome.failure().map(|f| f.report()),
    }))
}

async fn get_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SchemaRecord>, AppError> {
    state
        .store
        .get_schema(&name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("schema '{name}' not found")))
}

async fn update_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<UpdateSchemaRequest>, JsonRejection>,
) -> Result<Json<SchemaRecord>, AppError> {
    let req = extract_json(body)?;
    Ok(Json(state.store.update_schema(&name, &req.definition)?))
}

async fn delete_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_schema(&name)?;
    Ok(StatusCode::NO_CONTENT)
}
