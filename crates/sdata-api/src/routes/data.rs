//! # Data Record API
//!
//! - `GET    /v1/data`           : List data records
//! - `POST   /v1/data`           : Create a data record
//! - `GET    /v1/data/{key}`     : Fetch a data record
//! - `PUT    /v1/data/{key}`     : Partially update a data record
//! - `DELETE /v1/data/{key}`     : Delete a data record
//! - `GET    /v1/data/{key}/json`: The record's content rendered as JSON
//!
//! Creates and updates are refused with 422 unless the content validates
//! against the record's schema.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sdata_store::{DataRecord, DataUpdate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Assemble the data router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/data", get(list_data).post(create_data))
        .route(
            "/v1/data/{key}",
            get(get_data).put(update_data).delete(delete_data),
        )
        .route("/v1/data/{key}/json", get(get_data_json))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDataRequest {
    pub key: String,
    pub schema_name: String,
    /// YAML or JSON text.
    pub content: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateDataRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<UpdateDataRequest> for DataUpdate {
    fn from(req: UpdateDataRequest) -> Self {
        Self {
            description: req.description,
            schema_name: req.schema_name,
            content: req.content,
        }
    }
}

fn not_found(key: &str) -> AppError {
    AppError::NotFound(format!("data '{key}' not found"))
}

async fn list_data(State(state): State<AppState>) -> Json<Vec<DataRecord>> {
    Json(state.store.list_data())
}

async fn create_data(
    State(state): State<AppState>,
    body: Result<Json<CreateDataRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataRecord>), AppError> {
    let req = extract_json(body)?;
    let record =
        DataRecord::new(req.key, req.schema_name, req.content).with_description(req.description);
    let record = state.store.create_data(record)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_data(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DataRecord>, AppError> {
    state.store.get_data(&key).map(Json).ok_or_else(|| not_found(&key))
}

async fn update_data(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<UpdateDataRequest>, JsonRejection>,
) -> Result<Json<DataRecord>, AppError> {
    let req = extract_json(body)?;
    Ok(Json(state.store.update_data(&key, req.into())?))
}

async fn delete_data(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_data(&key)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_data_json(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.store.get_data(&key).ok_or_else(|| not_found(&key))?;
    // Stored content has already passed validation, so it always parses.
    let json = record
        .as_json_string()
        .map_err(|e| AppError::Internal(format!("stored content for '{key}' no longer parses: {e}")))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}
