/// Validation failures for a user-supplied context document.
/// The Display text doubles as the inline feedback shown next to the field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The text does not parse as JSON at all.
    #[error("Invalid JSON")]
    InvalidJson,
    /// Valid JSON whose top-level value is not an array.
    #[error("Context should be an array")]
    NotAnArray,
}

impl ContextError {
    /// Short classification string for logging/metrics.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::NotAnArray => "not_an_array",
        }
    }
}
