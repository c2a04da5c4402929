//! Domain-level errors

use thiserror::Error;

/// Errors that can occur while reading a configuration record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The raw document is not a JSON object
    #[error("Invalid configuration record: {0}")]
    InvalidRecord(String),

    /// A field required for the lookup is absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A field is present but has the wrong type or an out-of-range value
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Unknown exception kind name
    #[error("Unknown exception kind: {0}")]
    UnknownExceptionKind(String),
}

impl DomainError {
    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
