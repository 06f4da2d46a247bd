use serde::{Deserialize, Serialize};

/// Context-synchronization event kinds understood by the hub.
/// Wire values are stable kebab-case strings, distinct from the variant names.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    OpenPatientChart,
    SwitchPatientChart,
    ClosePatientChart,
    OpenImagingStudy,
    SwitchImagingStudy,
    CloseImagingStudy,
    LogoutUser,
    HibernateUser,
}

impl EventKind {
    /// Every kind, in protocol declaration order. Used by view layers to
    /// build selection lists.
    pub const ALL: [EventKind; 8] = [
        Self::OpenPatientChart,
        Self::SwitchPatientChart,
        Self::ClosePatientChart,
        Self::OpenImagingStudy,
        Self::SwitchImagingStudy,
        Self::CloseImagingStudy,
        Self::LogoutUser,
        Self::HibernateUser,
    ];

    /// Stable wire string for this kind.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::OpenPatientChart => "open-patient-chart",
            Self::SwitchPatientChart => "switch-patient-chart",
            Self::ClosePatientChart => "close-patient-chart",
            Self::OpenImagingStudy => "open-imaging-study",
            Self::SwitchImagingStudy => "switch-imaging-study",
            Self::CloseImagingStudy => "close-imaging-study",
            Self::LogoutUser => "logout-user",
            Self::HibernateUser => "hibernate-user",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A string that matches no defined wire value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);

impl std::str::FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_kebab_case() {
        assert_eq!(EventKind::OpenPatientChart.wire_name(), "open-patient-chart");
        assert_eq!(EventKind::SwitchImagingStudy.wire_name(), "switch-imaging-study");
        assert_eq!(EventKind::LogoutUser.wire_name(), "logout-user");
        assert_eq!(EventKind::HibernateUser.wire_name(), "hibernate-user");
    }

    #[test]
    fn all_lists_every_kind_once() {
        assert_eq!(EventKind::ALL.len(), 8);
        for kind in EventKind::ALL {
            assert_eq!(EventKind::ALL.iter().filter(|k| **k == kind).count(), 1);
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        for kind in EventKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.wire_name()));
            let parsed: EventKind = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn display_matches_wire_name() {
        for kind in EventKind::ALL {
            assert_eq!(kind.to_string(), kind.wire_name());
        }
    }

    #[test]
    fn from_str_roundtrip() {
        for kind in EventKind::ALL {
            let parsed: EventKind = kind.wire_name().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "open-patient-record".parse::<EventKind>().unwrap_err();
        assert_eq!(err, UnknownEventKind("open-patient-record".into()));
    }

    #[test]
    fn from_str_rejects_variant_names() {
        assert!("OpenPatientChart".parse::<EventKind>().is_err());
    }
}
