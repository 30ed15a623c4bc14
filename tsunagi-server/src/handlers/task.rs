use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
};
use std::collections::HashMap;
use std::sync::Arc;
use tsunagi_core::{HashType, RequestEnvelope};

use super::{error_response, fhir_response, resolve_tenant, HandlerResult};
use crate::translation::{TaskLookup, TaskUpdate};
use crate::AppState;

/// Read task (GET /Task/{id})
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
) -> HandlerResult {
    let (tenant, _) = resolve_tenant(&params, request).await?;
    let task_id = state.id_codec.lookup_id(HashType::Task, &task_id);

    tracing::info!(task_id = %task_id, "Reading task");

    let task = state
        .translator
        .get_task(&TaskLookup { tenant, task_id })
        .await
        .map_err(error_response)?;

    Ok(fhir_response(StatusCode::OK, task))
}

/// Update task (PUT /Task/{id})
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
) -> HandlerResult {
    let task_id = state
        .id_codec
        .mutation_id(HashType::Task, &task_id)
        .map_err(error_response)?;

    let (tenant, body) = resolve_tenant(&params, request).await?;
    let envelope = RequestEnvelope::parse(&body, "Task").map_err(error_response)?;

    tracing::info!(task_id = %task_id, fields = envelope.fields.len(), "Updating task");

    let result = state
        .translator
        .update_task(&TaskUpdate {
            tenant,
            task_id,
            data: envelope.fields,
        })
        .await
        .map_err(error_response)?;

    Ok(fhir_response(StatusCode::CREATED, result))
}
