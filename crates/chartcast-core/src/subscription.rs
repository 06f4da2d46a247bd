use secrecy::{ExposeSecret, SecretString};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::events::EventKind;
use crate::ids::ChannelToken;

/// Whether a request asks the hub to start or stop a subscription.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionMode {
    Subscribe,
    Unsubscribe,
}

impl SubscriptionMode {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Subscribe => "subscribe",
            Self::Unsubscribe => "unsubscribe",
        }
    }
}

impl std::fmt::Display for SubscriptionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Shared secret the hub uses to authenticate later deliveries.
/// Opaque to this client; redacted in Debug, exposed only while the wire
/// body is being serialized.
#[derive(Clone)]
pub struct SharedSecret(SecretString);

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::from(secret.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

/// A single subscribe/unsubscribe request, built fresh for every action
/// from the current field values plus the caller's callback URL and mode.
///
/// Serializes directly to the hub wire schema: a flat object with
/// `hub.*` / `channel.*` keys.
#[derive(Clone, Debug)]
pub struct SubscriptionRequest {
    /// Caller-chosen session identifier; opaque to the protocol.
    pub topic: String,
    /// Selected event kinds. Insertion order is irrelevant semantically but
    /// the wire value round-trips as a list.
    pub events: Vec<EventKind>,
    pub mode: SubscriptionMode,
    /// The invoking application's own reachable endpoint.
    pub callback: String,
    pub secret: SharedSecret,
    /// Hub-imposed subscription lifetime, in seconds.
    pub lease: u32,
    /// Delivery transport the hub should use, e.g. "websocket".
    pub channel_type: String,
    /// Identifies the specific channel instance.
    pub channel_endpoint: ChannelToken,
}

impl Serialize for SubscriptionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SubscriptionRequest", 8)?;
        state.serialize_field("hub.callback", &self.callback)?;
        state.serialize_field("hub.mode", &self.mode)?;
        state.serialize_field("hub.topic", &self.topic)?;
        state.serialize_field("hub.events", &self.events)?;
        state.serialize_field("hub.secret", self.secret.expose())?;
        state.serialize_field("hub.lease", &self.lease)?;
        state.serialize_field("channel.type", &self.channel_type)?;
        state.serialize_field("channel.endpoint", &self.channel_endpoint)?;
        state.end()
    }
}

/// Synchronous acknowledgment from the hub, or the record of a transport
/// failure (absent status).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HubResponse {
    pub status: Option<u16>,
    pub status_text: String,
}

impl HubResponse {
    /// Display text when no response was obtained at all.
    pub const NETWORK_ERROR_TEXT: &'static str = "Network Error";

    /// A response the hub actually returned.
    pub fn received(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            status_text: status_text.into(),
        }
    }

    /// No response obtained (network/DNS/timeout).
    pub fn network_error() -> Self {
        Self {
            status: None,
            status_text: Self::NETWORK_ERROR_TEXT.to_string(),
        }
    }

    /// The hub acknowledged with a conventional success status.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(s) if (200..300).contains(&s))
    }
}

/// Normalized descriptor handed to the caller when the hub acknowledges a
/// subscribe or unsubscribe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionNotice {
    pub hub_url: String,
    pub client_url: String,
    pub topic: String,
    pub events: Vec<EventKind>,
}
