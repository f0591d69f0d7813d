//! Instance lifecycle handlers.
//!
//! Request bodies are ignored; every call is a single round trip to the store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{CreateInstanceResponse, ListInstancesResponse, TerminateInstanceResponse},
    AppState,
};

/// Create an instance with a freshly generated instance id.
pub async fn create_instance(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateInstanceResponse>), AppError> {
    let created = state.instances.create().await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInstanceResponse::created(created.instance_id)),
    ))
}

/// List every stored instance id.
pub async fn list_instances(
    State(state): State<AppState>,
) -> Result<Json<ListInstancesResponse>, AppError> {
    let instances = state.instances.list().await?;

    Ok(Json(ListInstancesResponse { instances }))
}

/// Terminate the instance stored under row id `id`.
pub async fn terminate_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TerminateInstanceResponse>, AppError> {
    let row_id = parse_row_id(&id)?;

    tracing::info!(row_id = row_id, "Terminating instance");
    state.instances.terminate(row_id).await?;

    Ok(Json(TerminateInstanceResponse::success(row_id)))
}

fn parse_row_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid id")))
}
