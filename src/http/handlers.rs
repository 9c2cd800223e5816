//! Record endpoints.
//!
//! Each handler performs exactly one call on the remote table and reshapes
//! what comes back into flat `{ id, ...fields }` objects.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::request::RecordPayload;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::remote::RemoteError;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /record`
pub async fn list_records(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    tracing::debug!("Fetching records");
    let records = state
        .table
        .list_all()
        .await
        .map_err(|e| remote_failure("list", None, e))?;

    tracing::debug!(count = records.len(), "Records fetched");
    Ok(Json(records.into_iter().map(|r| r.into_flat()).collect()))
}

/// `POST /record`
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body?;
    let record = state
        .table
        .create(payload.fields)
        .await
        .map_err(|e| remote_failure("create", None, e))?;

    tracing::info!(record_id = %record.id, "Record created");
    Ok((StatusCode::CREATED, Json(record.into_flat())))
}

/// `PUT /record/{id}`
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RecordPayload>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = body?;
    let record = state
        .table
        .update(&id, payload.fields)
        .await
        .map_err(|e| remote_failure("update", Some(&id), e))?;

    Ok(Json(record.into_flat()))
}

/// `DELETE /record/{id}`
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .table
        .delete(&id)
        .await
        .map_err(|e| remote_failure("delete", Some(&id), e))?;

    tracing::info!(record_id = %id, "Record deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn remote_failure(operation: &'static str, record_id: Option<&str>, err: RemoteError) -> ApiError {
    tracing::error!(
        operation,
        record_id = record_id.unwrap_or("-"),
        error = %err,
        "Remote call failed"
    );
    ApiError::Remote(err)
}
