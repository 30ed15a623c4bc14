//! GET handlers shared by `/Appointment` and `/ClockIn`.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
};
use std::collections::HashMap;
use std::sync::Arc;
use tsunagi_core::{HashType, SortField, APPOINTMENT_SORT_FIELDS};

use super::{error_response, fhir_response, method_not_allowed, resolve_tenant, HandlerResult};
use crate::translation::{AppointmentLookup, AppointmentSearch};
use crate::AppState;

/// Search (GET /Appointment, GET /ClockIn)
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
) -> HandlerResult {
    let (tenant, _) = resolve_tenant(&params, request).await?;
    let sort = SortField::parse_list(params.get("_sort").map(String::as_str), APPOINTMENT_SORT_FIELDS);

    tracing::info!(
        agency_id = tenant.agency_id.as_deref().unwrap_or("-"),
        sort_fields = sort.len(),
        "Searching appointments"
    );

    let bundle = state
        .translator
        .search_appointments(&AppointmentSearch { tenant, sort })
        .await
        .map_err(error_response)?;

    Ok(fhir_response(StatusCode::OK, bundle))
}

/// Read (GET /Appointment/{id}, GET /ClockIn/{id})
pub async fn read(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    request: Request,
) -> HandlerResult {
    if appointment_id == "_search" {
        return Err(method_not_allowed(request.uri().path()));
    }

    let (tenant, _) = resolve_tenant(&params, request).await?;
    let appointment_id = state.id_codec.lookup_id(HashType::Shift, &appointment_id);

    tracing::info!(appointment_id = %appointment_id, "Reading appointment");

    let appointment = state
        .translator
        .get_appointment(&AppointmentLookup {
            tenant,
            appointment_id,
        })
        .await
        .map_err(error_response)?;

    Ok(fhir_response(StatusCode::OK, appointment))
}
