//! Reshaping of backend GraphQL nodes into FHIR resources.

use serde_json::{json, Map, Value};

fn str_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key).and_then(|v| v.as_str())
}

fn insert_some(target: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value
        && !v.is_null()
    {
        target.insert(key.to_string(), v);
    }
}

/// Backend shift status -> FHIR Appointment.status
pub fn appointment_status(backend: Option<&str>) -> &'static str {
    match backend {
        Some("SCHEDULED") => "booked",
        Some("IN_PROGRESS") => "arrived",
        Some("COMPLETED") => "fulfilled",
        Some("CANCELLED") => "cancelled",
        Some("MISSED") => "noshow",
        _ => "proposed",
    }
}

fn participant(person: &Value, reference_type: &str) -> Option<Value> {
    let id = str_field(person, "id")?;
    let display = [str_field(person, "firstName"), str_field(person, "lastName")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let mut actor = Map::new();
    actor.insert(
        "reference".to_string(),
        json!(format!("{}/{}", reference_type, id)),
    );
    if !display.is_empty() {
        actor.insert("display".to_string(), json!(display));
    }
    Some(json!({ "actor": actor, "status": "accepted" }))
}

/// Shift node -> Appointment
pub fn shift_to_appointment(shift: &Value) -> Value {
    let mut out = Map::new();
    out.insert("resourceType".to_string(), json!("Appointment"));
    insert_some(&mut out, "id", shift.get("id").cloned());
    out.insert(
        "status".to_string(),
        json!(appointment_status(str_field(shift, "status"))),
    );
    insert_some(&mut out, "start", shift.get("startTime").cloned());
    insert_some(&mut out, "end", shift.get("endTime").cloned());

    let participants: Vec<Value> = [("caregiver", "Practitioner"), ("client", "Patient")]
        .into_iter()
        .filter_map(|(key, reference_type)| {
            shift.get(key).and_then(|p| participant(p, reference_type))
        })
        .collect();
    if !participants.is_empty() {
        out.insert("participant".to_string(), Value::Array(participants));
    }

    Value::Object(out)
}

/// Shift search payload -> (bundle entries, total)
pub fn shift_search_entries(search: &Value) -> (Vec<Value>, u64) {
    let results = search
        .get("results")
        .and_then(|r| r.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    let entries: Vec<Value> = results
        .iter()
        .map(|shift| {
            let resource = shift_to_appointment(shift);
            let full_url = format!(
                "Appointment/{}",
                resource.get("id").and_then(|v| v.as_str()).unwrap_or("")
            );
            json!({ "fullUrl": full_url, "resource": resource })
        })
        .collect();

    let total = search
        .get("totalRecords")
        .and_then(|t| t.as_u64())
        .unwrap_or(entries.len() as u64);

    (entries, total)
}

/// Wrap search entries in a searchset Bundle
pub fn searchset_bundle(entries: Vec<Value>, total: u64) -> Value {
    json!({
        "resourceType": "Bundle",
        "id": "searchParams",
        "type": "searchset",
        "totalRecords": total,
        "entry": entries
    })
}

/// `caregiverClockIn` payload -> Encounter
pub fn clock_in_to_encounter(payload: &Value) -> Value {
    let care_log = payload.get("careLog").unwrap_or(&Value::Null);

    let mut out = Map::new();
    out.insert("resourceType".to_string(), json!("Encounter"));
    insert_some(&mut out, "id", care_log.get("id").cloned());
    out.insert("status".to_string(), json!("in-progress"));

    if let Some(start) = care_log.get("clockInTime").filter(|v| !v.is_null()) {
        out.insert("period".to_string(), json!({ "start": start }));
    }

    let mut position = Map::new();
    insert_some(&mut position, "latitude", care_log.get("latitude").cloned());
    insert_some(&mut position, "longitude", care_log.get("longitude").cloned());
    if !position.is_empty() {
        out.insert("position".to_string(), Value::Object(position));
    }

    if let Some(shift_id) = care_log.get("shift").and_then(|s| str_field(s, "id")) {
        out.insert(
            "appointment".to_string(),
            json!([{ "reference": format!("Appointment/{}", shift_id) }]),
        );
    }

    if let Some(errors) = payload.get("errors").and_then(|e| e.as_array())
        && !errors.is_empty()
    {
        out.insert("errors".to_string(), Value::Array(errors.clone()));
    }

    Value::Object(out)
}

/// Task node -> Task
pub fn task_to_fhir(task: &Value) -> Value {
    let mut out = Map::new();
    out.insert("resourceType".to_string(), json!("Task"));
    insert_some(&mut out, "id", task.get("id").cloned());
    insert_some(
        &mut out,
        "status",
        str_field(task, "status").map(|s| json!(s.to_lowercase())),
    );
    insert_some(&mut out, "description", task.get("description").cloned());
    if let Some(due) = task.get("dueDate").filter(|v| !v.is_null()) {
        out.insert(
            "restriction".to_string(),
            json!({ "period": { "end": due } }),
        );
    }
    if let Some(care_log_id) = task.get("careLog").and_then(|c| str_field(c, "id")) {
        out.insert(
            "focus".to_string(),
            json!({ "reference": format!("Encounter/{}", care_log_id) }),
        );
    }
    Value::Object(out)
}
