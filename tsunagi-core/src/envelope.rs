use serde_json::{Map, Value};

use crate::{Result, TsunagiError};

/// Incoming FHIR resource body with its `resourceType` checked and removed.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub resource_type: String,
    pub fields: Map<String, Value>,
}

impl RequestEnvelope {
    /// Parse a raw request body and require `resourceType == expected`
    pub fn parse(body: &[u8], expected: &str) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value, expected)
    }

    pub fn from_value(value: Value, expected: &str) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(TsunagiError::unprocessable(format!(
                "'resourceType' should be {}.",
                expected
            )));
        };

        match fields.remove("resourceType") {
            Some(Value::String(rt)) if rt == expected => Ok(Self {
                resource_type: rt,
                fields,
            }),
            _ => Err(TsunagiError::unprocessable(format!(
                "'resourceType' should be {}.",
                expected
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_resource_type() {
        let body = br#"{"resourceType":"Encounter","status":"in-progress"}"#;
        let envelope = RequestEnvelope::parse(body, "Encounter").unwrap();
        assert_eq!(envelope.resource_type, "Encounter");
        assert!(!envelope.fields.contains_key("resourceType"));
        assert_eq!(envelope.fields["status"], "in-progress");
    }

    #[test]
    fn test_wrong_resource_type() {
        let err = RequestEnvelope::from_value(json!({"resourceType": "Task"}), "Encounter")
            .unwrap_err();
        assert!(matches!(err, TsunagiError::UnprocessableEntity(_)));
        assert_eq!(err.to_string(), "'resourceType' should be Encounter.");
    }

    #[test]
    fn test_missing_resource_type() {
        let err = RequestEnvelope::from_value(json!({"description": "x"}), "Task").unwrap_err();
        assert!(matches!(err, TsunagiError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_non_object_body() {
        let err = RequestEnvelope::from_value(json!(["Encounter"]), "Encounter").unwrap_err();
        assert!(matches!(err, TsunagiError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = RequestEnvelope::parse(b"{not json", "Encounter").unwrap_err();
        assert!(matches!(err, TsunagiError::InvalidJson(_)));
    }
}
