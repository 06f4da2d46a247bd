use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_token {
    ($name:ident) => {
        #[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_raw(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

uuid_token!(EventId);
uuid_token!(ChannelToken);

/// Source of publish ids. Stateless by contract; injected into the
/// publisher so tests can substitute a deterministic sequence.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> EventId;
}

/// Default source: a fresh UUID v4 per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidV4Source;

impl IdSource for UuidV4Source {
    fn next_id(&self) -> EventId {
        EventId::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique() {
        let a = EventId::new();
        let b = EventId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn event_id_is_uuid_v4() {
        let id = EventId::new();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn channel_token_is_uuid_v4() {
        let token = ChannelToken::new();
        let parsed = Uuid::parse_str(token.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn display_and_from_str_roundtrip() {
        let id = EventId::new();
        let parsed: EventId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_roundtrip_is_transparent() {
        let id = EventId::from_raw("3b241101-e2bb-4255-8caf-4136c566a962");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3b241101-e2bb-4255-8caf-4136c566a962\"");
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn from_raw_preserves_value() {
        let token = ChannelToken::from_raw("fixed-endpoint");
        assert_eq!(token.as_str(), "fixed-endpoint");
    }

    #[test]
    fn uuid_source_yields_distinct_ids() {
        let source = UuidV4Source;
        assert_ne!(source.next_id(), source.next_id());
    }
}
