pub mod appointment;
pub mod clock;
pub mod metadata;
pub mod task;

use axum::{
    body::Bytes,
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use tsunagi_core::{OperationOutcome, TsunagiError};

use crate::tenant::{parse_form, Tenant};

pub type HandlerResult = Result<Response, (StatusCode, Json<Value>)>;

const FHIR_JSON: &str = "application/fhir+json; charset=utf-8";

/// JSON response with the FHIR content type
pub fn fhir_response(status: StatusCode, resource: Value) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(FHIR_JSON));
    (status, headers, Json(resource)).into_response()
}

pub fn status_for(err: &TsunagiError) -> StatusCode {
    match err {
        TsunagiError::NotFound { .. } => StatusCode::NOT_FOUND,
        TsunagiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TsunagiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
        TsunagiError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Convert an error into a status + OperationOutcome body
pub fn error_response(err: TsunagiError) -> (StatusCode, Json<Value>) {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(status = %status, error = %err, "Request failed");
    } else {
        tracing::info!(status = %status, error = %err, "Request rejected");
    }
    (status, Json(json!(OperationOutcome::from(&err))))
}

pub fn method_not_allowed(path: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!(OperationOutcome::method_not_allowed(path))),
    )
}

/// Split a request into its headers and collected body bytes
async fn extract_body(request: Request) -> Result<(HeaderMap, Bytes), (StatusCode, Json<Value>)> {
    let (parts, body) = request.into_parts();
    let bytes = body
        .collect()
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!(OperationOutcome::error(
                    tsunagi_core::IssueType::Invalid,
                    e.to_string()
                ))),
            )
        })?
        .to_bytes();
    Ok((parts.headers, bytes))
}

/// Tenant from the query string, falling back to a form-encoded body
async fn resolve_tenant(
    query: &HashMap<String, String>,
    request: Request,
) -> Result<(Tenant, Bytes), (StatusCode, Json<Value>)> {
    let (headers, body) = extract_body(request).await?;
    let form = parse_form(&headers, &body);
    Ok((Tenant::resolve(query, &form), body))
}
