use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use chartcast_core::{CastHandler, EventEnvelope, EventId, IdSource, SubscriptionNotice};

/// Handler that records every notification, for deterministic assertions
/// without a real collaborator.
#[derive(Default)]
pub struct RecordingHandler {
    subscribed: Mutex<Vec<SubscriptionNotice>>,
    unsubscribed: Mutex<Vec<SubscriptionNotice>>,
    published: Mutex<Vec<(EventEnvelope, EventId)>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribed(&self) -> Vec<SubscriptionNotice> {
        self.subscribed.lock().clone()
    }

    pub fn unsubscribed(&self) -> Vec<SubscriptionNotice> {
        self.unsubscribed.lock().clone()
    }

    pub fn published(&self) -> Vec<(EventEnvelope, EventId)> {
        self.published.lock().clone()
    }

    /// Total notifications of any kind.
    pub fn notification_count(&self) -> usize {
        self.subscribed.lock().len() + self.unsubscribed.lock().len() + self.published.lock().len()
    }
}

impl CastHandler for RecordingHandler {
    fn on_subscribed(&self, notice: &SubscriptionNotice) {
        self.subscribed.lock().push(notice.clone());
    }

    fn on_unsubscribed(&self, notice: &SubscriptionNotice) {
        self.unsubscribed.lock().push(notice.clone());
    }

    fn on_publish(&self, envelope: &EventEnvelope, id: &EventId) {
        self.published.lock().push((envelope.clone(), id.clone()));
    }
}

/// Id source that replays a preset sequence in order.
/// Panics when asked for more ids than were configured.
pub struct FixedIds {
    ids: Vec<EventId>,
    next: AtomicUsize,
}

impl FixedIds {
    pub fn new(ids: Vec<EventId>) -> Self {
        Self {
            ids,
            next: AtomicUsize::new(0),
        }
    }

    /// How many ids have been handed out so far.
    pub fn issued(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }
}

impl IdSource for FixedIds {
    fn next_id(&self) -> EventId {
        let idx = self.next.fetch_add(1, Ordering::Relaxed);
        self.ids
            .get(idx)
            .unwrap_or_else(|| panic!("FixedIds: no id configured for call {idx}"))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartcast_core::EventKind;

    #[test]
    fn recording_handler_keeps_notices_apart() {
        let handler = RecordingHandler::new();
        let notice = SubscriptionNotice {
            hub_url: "https://hub.example".into(),
            client_url: "https://client.example".into(),
            topic: "DrXRay".into(),
            events: vec![EventKind::OpenPatientChart],
        };

        handler.on_subscribed(&notice);
        handler.on_unsubscribed(&notice);
        handler.on_unsubscribed(&notice);

        assert_eq!(handler.subscribed().len(), 1);
        assert_eq!(handler.unsubscribed().len(), 2);
        assert!(handler.published().is_empty());
        assert_eq!(handler.notification_count(), 3);
    }

    #[test]
    fn fixed_ids_replay_in_order() {
        let source = FixedIds::new(vec![EventId::from_raw("id-1"), EventId::from_raw("id-2")]);
        assert_eq!(source.next_id().as_str(), "id-1");
        assert_eq!(source.next_id().as_str(), "id-2");
        assert_eq!(source.issued(), 2);
    }

    #[test]
    #[should_panic(expected = "no id configured for call 0")]
    fn fixed_ids_panic_when_exhausted() {
        FixedIds::new(Vec::new()).next_id();
    }
}
