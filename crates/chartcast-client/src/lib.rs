pub mod config;
pub mod publisher;
pub mod subscriber;

pub mod mock;

pub use config::SubscriptionDefaults;
pub use publisher::{EventPublisher, PublishForm};
pub use subscriber::{
    StatusLine, SubmitState, SubscriptionClient, SubscriptionFields, SubscriptionForm,
};
