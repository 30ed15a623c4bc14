use serde_json::Value;
use tsunagi_core::field_mapping::build_clock_arguments;
use tsunagi_core::{shape, ClockDirection, Result};
use tsunagi_graphql::query;

use super::{ClockIn, ClockOut, Translator};

impl Translator {
    /// Record a caregiver clock-in; the result is shaped as an Encounter
    pub async fn create_clock_in(&self, req: &ClockIn) -> Result<Value> {
        let args = build_clock_arguments(ClockDirection::In, &req.shift_id, &req.data);
        let document = query::clock_in_mutation(&args)?;
        let payload = self
            .run(&req.tenant, &document, query::CLOCK_IN_FIELD)
            .await?;
        Ok(shape::clock_in_to_encounter(&payload))
    }

    /// Record a caregiver clock-out; the backend payload is returned as is
    pub async fn create_clock_out(&self, req: &ClockOut) -> Result<Value> {
        let args = build_clock_arguments(ClockDirection::Out, &req.carelog_id, &req.data);
        let document = query::clock_out_mutation(&args)?;
        self.run(&req.tenant, &document, query::CLOCK_OUT_FIELD)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::Tenant;
    use crate::translation::testing::{translator, StubExecutor};
    use serde_json::{json, Map};
    use tsunagi_core::TsunagiError;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_clock_in() {
        let stub = StubExecutor::with(vec![(
            "caregiverClockIn",
            json!({"caregiverClockIn": {
                "careLog": {"id": "Q2FyZUxvZzo5", "clockInTime": "2024-03-01T09:02:00Z"},
                "errors": []
            }}),
        )]);
        let translator = translator(stub.clone());

        let encounter = translator
            .create_clock_in(&ClockIn {
                tenant: Tenant::default(),
                shift_id: "U2hpZnQ6NDI=".to_string(),
                data: data(json!({
                    "position": {"latitude": 1.1, "longitude": 2.2},
                    "period": {"start": "2024-03-01T09:02:00Z", "end": "ignored"},
                    "status": ""
                })),
            })
            .await
            .unwrap();

        assert_eq!(encounter["resourceType"], "Encounter");
        assert_eq!(encounter["id"], "Q2FyZUxvZzo5");

        let document = &stub.calls()[0];
        assert!(document.contains(
            r#"input: {clockInTime: "2024-03-01T09:02:00Z", latitude: 1.1, longitude: 2.2, shiftId: "U2hpZnQ6NDI="}"#
        ));
        assert!(!document.contains("ignored"));
        assert!(!document.contains("status:"));
    }

    #[tokio::test]
    async fn test_clock_out_returns_raw_payload() {
        let payload = json!({
            "careLog": {"id": "Q2FyZUxvZzo5", "clockOutTime": "2024-03-01T13:00:00Z"},
            "errors": []
        });
        let stub = StubExecutor::with(vec![(
            "caregiverClockOut",
            json!({"caregiverClockOut": payload.clone()}),
        )]);
        let translator = translator(stub.clone());

        let result = translator
            .create_clock_out(&ClockOut {
                tenant: Tenant::default(),
                carelog_id: "Q2FyZUxvZzo5".to_string(),
                data: data(json!({"period": {"start": "x", "end": "2024-03-01T13:00:00Z"}})),
            })
            .await
            .unwrap();

        assert_eq!(result, payload);
        assert!(stub.calls()[0].contains(
            r#"input: {careLogId: "Q2FyZUxvZzo5", clockOutTime: "2024-03-01T13:00:00Z"}"#
        ));
    }

    #[tokio::test]
    async fn test_invalid_argument_name_never_reaches_backend() {
        let stub = StubExecutor::with(vec![]);
        let translator = translator(stub.clone());

        let err = translator
            .create_clock_in(&ClockIn {
                tenant: Tenant::default(),
                shift_id: "U2hpZnQ6NDI=".to_string(),
                data: data(json!({"bad key": "x"})),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TsunagiError::UnprocessableEntity(_)));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_response_field() {
        let stub = StubExecutor::with(vec![("caregiverClockOut", json!({"other": {}}))]);
        let err = translator(stub)
            .create_clock_out(&ClockOut {
                tenant: Tenant::default(),
                carelog_id: "Q2FyZUxvZzo5".to_string(),
                data: Map::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TsunagiError::Backend(_)));
    }
}
