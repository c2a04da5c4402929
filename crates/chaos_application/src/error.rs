//! Application-level errors

use chaos_domain::{DomainError, InjectedError};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The named parameter does not exist in the store
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    /// The record is enabled but lacks the requested field
    #[error("Key not found in configuration record: {0}")]
    KeyLookup(String),

    /// The store returned something that is not a valid record
    #[error("Invalid configuration record for '{parameter}': {reason}")]
    InvalidRecord { parameter: String, reason: String },

    /// The store could not be reached or failed
    #[error("Parameter store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Deliberately injected fault
    #[error(transparent)]
    Injected(#[from] InjectedError),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Check if this error was raised by exception injection
    pub const fn is_injected(&self) -> bool {
        matches!(self, Self::Injected(_))
    }

    /// Create an invalid record error
    pub fn invalid_record(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
