pub mod envelope;
pub mod errors;
pub mod events;
pub mod handler;
pub mod ids;
pub mod subscription;

pub use envelope::{validate_context, EventEnvelope};
pub use errors::ContextError;
pub use events::EventKind;
pub use handler::CastHandler;
pub use ids::{ChannelToken, EventId, IdSource, UuidV4Source};
pub use subscription::{
    HubResponse, SharedSecret, SubscriptionMode, SubscriptionNotice, SubscriptionRequest,
};
