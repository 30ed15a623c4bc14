use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};
use tsunagi_core::APPOINTMENT_SORT_FIELDS;

/// Resource endpoints and the interactions each one supports
const RESOURCE_INTERACTIONS: &[(&str, &[&str])] = &[
    ("Appointment", &["read", "search-type"]),
    ("ClockIn", &["read", "search-type", "create"]),
    ("ClockOut", &["update"]),
    ("Task", &["read", "update"]),
];

/// Health check (GET /health)
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// CapabilityStatement (GET /metadata)
pub async fn capability_statement() -> Json<Value> {
    let resources: Vec<Value> = RESOURCE_INTERACTIONS
        .iter()
        .map(|(resource_type, interactions)| {
            let mut resource = json!({
                "type": resource_type,
                "interaction": interactions
                    .iter()
                    .map(|code| json!({"code": code}))
                    .collect::<Vec<_>>(),
            });
            if interactions.contains(&"search-type") {
                resource["searchParam"] = json!([{
                    "name": "_sort",
                    "type": "string",
                    "documentation": format!("One of: {}", APPOINTMENT_SORT_FIELDS.join(", "))
                }]);
            }
            resource
        })
        .collect();

    Json(json!({
        "resourceType": "CapabilityStatement",
        "status": "active",
        "kind": "instance",
        "fhirVersion": "4.0.1",
        "format": ["application/fhir+json"],
        "software": {
            "name": "tsunagi",
            "version": env!("CARGO_PKG_VERSION")
        },
        "rest": [{
            "mode": "server",
            "resource": resources
        }]
    }))
}
