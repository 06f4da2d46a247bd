use chartcast_core::{EventKind, SharedSecret};

/// Initial values for a subscription form, matching what a fresh session
/// presents before the user edits anything.
#[derive(Clone, Debug)]
pub struct SubscriptionDefaults {
    pub topic: String,
    pub events: Vec<EventKind>,
    pub secret: SharedSecret,
    /// Requested lease, in seconds.
    pub lease: u32,
    pub channel_type: String,
}

impl Default for SubscriptionDefaults {
    fn default() -> Self {
        Self {
            topic: "DrXRay".into(),
            events: vec![EventKind::OpenPatientChart, EventKind::ClosePatientChart],
            secret: SharedSecret::new("secret"),
            lease: 999,
            channel_type: "websocket".into(),
        }
    }
}

/// Event kind pre-selected in a fresh publish form.
pub const DEFAULT_EVENT: EventKind = EventKind::OpenPatientChart;

/// Pretty-printed context document pre-filled in a fresh publish form.
pub fn default_context() -> String {
    let context = serde_json::json!([
        {
            "key": "patient",
            "resource": {
                "resourceType": "Patient",
                "id": "ewUbXT9RWEbSj5wPEdgRaBw3"
            }
        }
    ]);
    serde_json::to_string_pretty(&context).expect("static context document serializes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartcast_core::validate_context;

    #[test]
    fn defaults_match_initial_session_state() {
        let defaults = SubscriptionDefaults::default();
        assert_eq!(defaults.topic, "DrXRay");
        assert_eq!(
            defaults.events,
            vec![EventKind::OpenPatientChart, EventKind::ClosePatientChart]
        );
        assert_eq!(defaults.secret.expose(), "secret");
        assert_eq!(defaults.lease, 999);
        assert_eq!(defaults.channel_type, "websocket");
    }

    #[test]
    fn default_context_is_a_valid_array() {
        let items = validate_context(&default_context()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["key"], "patient");
    }

    #[test]
    fn default_context_is_pretty_printed() {
        assert!(default_context().contains('\n'));
    }
}
