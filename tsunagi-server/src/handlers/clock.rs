//! Clock-in (POST /ClockIn/{shift_id}) and clock-out (PUT /ClockOut/{carelog_id}).

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
};
use std::collections::HashMap;
use std::sync::Arc;
use tsunagi_core::{HashType, RequestEnvelope};

use super::{error_response, fhir_response, resolve_tenant, HandlerResult};
use crate::translation::{ClockIn, ClockOut};
use crate::AppState;

const ENCOUNTER: &str = "Encounter";

pub async fn clock_in(
    State(state): State<Arc<AppState>>,
    Path(shift_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
) -> HandlerResult {
    let shift_id = state
        .id_codec
        .mutation_id(HashType::Shift, &shift_id)
        .map_err(error_response)?;

    let (tenant, body) = resolve_tenant(&params, request).await?;
    let envelope = RequestEnvelope::parse(&body, ENCOUNTER).map_err(error_response)?;

    tracing::info!(shift_id = %shift_id, fields = envelope.fields.len(), "Clocking in");

    let encounter = state
        .translator
        .create_clock_in(&ClockIn {
            tenant,
            shift_id,
            data: envelope.fields,
        })
        .await
        .map_err(error_response)?;

    Ok(fhir_response(StatusCode::CREATED, encounter))
}

pub async fn clock_out(
    State(state): State<Arc<AppState>>,
    Path(carelog_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
) -> HandlerResult {
    let carelog_id = state
        .id_codec
        .mutation_id(HashType::CareLog, &carelog_id)
        .map_err(error_response)?;

    let (tenant, body) = resolve_tenant(&params, request).await?;
    let envelope = RequestEnvelope::parse(&body, ENCOUNTER).map_err(error_response)?;

    tracing::info!(carelog_id = %carelog_id, fields = envelope.fields.len(), "Clocking out");

    let result = state
        .translator
        .create_clock_out(&ClockOut {
            tenant,
            carelog_id,
            data: envelope.fields,
        })
        .await
        .map_err(error_response)?;

    Ok(fhir_response(StatusCode::CREATED, result))
}
