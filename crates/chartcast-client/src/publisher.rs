use std::sync::Arc;

use tracing::debug;

use chartcast_core::{
    validate_context, CastHandler, ContextError, EventEnvelope, EventId, EventKind, IdSource,
    UuidV4Source,
};

use crate::config::{default_context, DEFAULT_EVENT};

/// Validates context documents, builds envelopes, and hands them to the
/// publish collaborator. Holds no state across publishes.
pub struct EventPublisher {
    ids: Arc<dyn IdSource>,
    handler: Option<Arc<dyn CastHandler>>,
}

impl EventPublisher {
    pub fn new(handler: Arc<dyn CastHandler>) -> Self {
        Self {
            ids: Arc::new(UuidV4Source),
            handler: Some(handler),
        }
    }

    /// A publisher with no collaborator: validation still runs, but the
    /// publish action is a no-op ("publishing disabled"), not an error.
    pub fn disabled() -> Self {
        Self {
            ids: Arc::new(UuidV4Source),
            handler: None,
        }
    }

    /// Substitute the id source, for deterministic ids in tests.
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.handler.is_some()
    }

    /// Re-validate the context, build the envelope, and hand it off.
    ///
    /// Returns the fresh id on a successful handoff, `Ok(None)` when
    /// publishing is disabled. A validation failure invokes nothing and
    /// consumes no id.
    pub fn publish(
        &self,
        topic: &str,
        event: EventKind,
        context_raw: &str,
    ) -> Result<Option<EventId>, ContextError> {
        let context = validate_context(context_raw)?;

        let Some(handler) = &self.handler else {
            return Ok(None);
        };

        let id = self.ids.next_id();
        let envelope = EventEnvelope::new(topic, event, context);
        handler.on_publish(&envelope, &id);
        debug!(%id, event = %event, topic, "published event");
        Ok(Some(id))
    }
}

/// Inline feedback shown while the context text validates.
pub const VALID_FEEDBACK: &str = "Valid JSON";

/// State behind one publish form instance: current field values, the live
/// validation result, and the id of the previously published event.
#[derive(Clone, Debug)]
pub struct PublishForm {
    pub topic: String,
    pub event: EventKind,
    context_raw: String,
    context_error: Option<ContextError>,
    previous_id: Option<EventId>,
}

impl PublishForm {
    pub fn new() -> Self {
        let mut form = Self {
            topic: "DrXRay".into(),
            event: DEFAULT_EVENT,
            context_raw: String::new(),
            context_error: None,
            previous_id: None,
        };
        form.set_context(default_context());
        form
    }

    pub fn context_raw(&self) -> &str {
        &self.context_raw
    }

    /// Replace the context text and re-validate, as the live feedback path
    /// does on every edit.
    pub fn set_context(&mut self, raw: impl Into<String>) {
        self.context_raw = raw.into();
        self.context_error = validate_context(&self.context_raw).err();
    }

    pub fn context_error(&self) -> Option<&ContextError> {
        self.context_error.as_ref()
    }

    pub fn is_context_valid(&self) -> bool {
        self.context_error.is_none()
    }

    /// The publish action is available only while the context validates and
    /// the publisher has a collaborator.
    pub fn is_publish_allowed(&self, publisher: &EventPublisher) -> bool {
        publisher.is_enabled() && self.is_context_valid()
    }

    /// Publish with the current field values. Records the new id as
    /// "previously published" only on a successful handoff; a failed or
    /// disabled attempt leaves the previous id untouched.
    pub fn publish(&mut self, publisher: &EventPublisher) -> Result<Option<EventId>, ContextError> {
        let result = publisher.publish(&self.topic, self.event, &self.context_raw);
        match &result {
            Ok(Some(id)) => self.previous_id = Some(id.clone()),
            Ok(None) => {}
            Err(err) => self.context_error = Some(err.clone()),
        }
        result
    }

    pub fn previous_id(&self) -> Option<&EventId> {
        self.previous_id.as_ref()
    }

    /// Inline feedback text for the view layer.
    pub fn feedback(&self) -> String {
        match &self.context_error {
            Some(err) => err.to_string(),
            None => VALID_FEEDBACK.to_string(),
        }
    }
}

impl Default for PublishForm {
    fn default() -> Self {
        Self::new()
    }
}
