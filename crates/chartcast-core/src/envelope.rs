use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ContextError;
use crate::events::EventKind;

/// A publish-ready event envelope. `context` is a JSON array by
/// construction; a non-array context never reaches the publish collaborator.
///
/// The envelope's id travels alongside it, not inside it; see
/// [`CastHandler::on_publish`](crate::handler::CastHandler::on_publish).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventEnvelope {
    #[serde(rename = "hub.topic")]
    pub topic: String,
    #[serde(rename = "hub.event")]
    pub event: EventKind,
    pub context: Vec<Value>,
}

impl EventEnvelope {
    pub fn new(topic: impl Into<String>, event: EventKind, context: Vec<Value>) -> Self {
        Self {
            topic: topic.into(),
            event,
            context,
        }
    }
}

/// Parse `raw` as JSON, then check the top-level shape.
///
/// Pure: the same function backs the live edit feedback and the re-check at
/// publish time, so the two can never diverge.
pub fn validate_context(raw: &str) -> Result<Vec<Value>, ContextError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|_| ContextError::InvalidJson)?;
    match parsed {
        Value::Array(items) => Ok(items),
        _ => Err(ContextError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_array_roundtrips_deep_equal() {
        let original = json!([{"patient": "123"}, {"study": {"id": 7, "open": true}}]);
        let raw = serde_json::to_string(&original).unwrap();
        let parsed = validate_context(&raw).unwrap();
        assert_eq!(Value::Array(parsed), original);
    }

    #[test]
    fn empty_array_is_valid() {
        assert_eq!(validate_context("[]").unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn malformed_text_is_invalid_json() {
        assert_eq!(validate_context("not json").unwrap_err(), ContextError::InvalidJson);
        assert_eq!(validate_context("[{]").unwrap_err(), ContextError::InvalidJson);
    }

    #[test]
    fn empty_string_is_invalid_json() {
        assert_eq!(validate_context("").unwrap_err(), ContextError::InvalidJson);
    }

    #[test]
    fn non_array_shapes_are_rejected() {
        for raw in ["{}", r#"{"patient":"123"}"#, "42", "\"text\"", "true", "null"] {
            assert_eq!(
                validate_context(raw).unwrap_err(),
                ContextError::NotAnArray,
                "raw: {raw}"
            );
        }
    }

    #[test]
    fn whitespace_around_array_is_fine() {
        assert!(validate_context("  [ ]\n").is_ok());
    }

    #[test]
    fn envelope_serializes_to_wire_keys() {
        let envelope = EventEnvelope::new(
            "DrXRay",
            EventKind::OpenPatientChart,
            vec![json!({"patient": "123"})],
        );
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            wire,
            json!({
                "hub.topic": "DrXRay",
                "hub.event": "open-patient-chart",
                "context": [{"patient": "123"}],
            })
        );
    }
}
