use crate::envelope::EventEnvelope;
use crate::ids::EventId;
use crate::subscription::SubscriptionNotice;

/// Caller-implemented sink for the notifications this core emits.
///
/// All methods are fire-and-forget: the core invokes them synchronously,
/// never awaits their completion, and never retries. An implementation that
/// needs to block or suspend owns that behavior entirely.
pub trait CastHandler: Send + Sync {
    /// The hub acknowledged a subscribe request. Fires only on success.
    fn on_subscribed(&self, notice: &SubscriptionNotice);

    /// The hub acknowledged an unsubscribe request. Fires only on success.
    fn on_unsubscribed(&self, notice: &SubscriptionNotice);

    /// A validated envelope is ready for delivery, paired with its freshly
    /// generated id.
    fn on_publish(&self, envelope: &EventEnvelope, id: &EventId);
}
