//! Errors raised deliberately by exception injection

use thiserror::Error;

use crate::value_objects::ExceptionKind;

/// Error types that can be injected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectedError {
    /// Generic error
    #[error("Injected error: {0}")]
    Generic(String),

    /// Rejected value
    #[error("Injected invalid value: {0}")]
    InvalidValue(String),

    /// Wrong type
    #[error("Injected invalid type: {0}")]
    InvalidType(String),

    /// Simulated timeout
    #[error("Injected timeout: {0}")]
    Timeout(String),

    /// Connection refused
    #[error("Injected connection refused: {0}")]
    ConnectionRefused(String),

    /// Resource exhausted
    #[error("Injected resource exhaustion: {0}")]
    ResourceExhausted(String),

    /// Rate limited
    #[error("Injected rate limit: {0}")]
    RateLimited(String),
}

impl InjectedError {
    /// The kind this error was raised as
    pub const fn kind(&self) -> ExceptionKind {
        match self {
            Self::Generic(_) => ExceptionKind::Generic,
            Self::InvalidValue(_) => ExceptionKind::InvalidValue,
            Self::InvalidType(_) => ExceptionKind::InvalidType,
            Self::Timeout(_) => ExceptionKind::Timeout,
            Self::ConnectionRefused(_) => ExceptionKind::ConnectionRefused,
            Self::ResourceExhausted(_) => ExceptionKind::ResourceExhausted,
            Self::RateLimited(_) => ExceptionKind::RateLimited,
        }
    }

    /// The message the error carries
    pub fn message(&self) -> &str {
        match self {
            Self::Generic(msg)
            | Self::InvalidValue(msg)
            | Self::InvalidType(msg)
            | Self::Timeout(msg)
            | Self::ConnectionRefused(msg)
            | Self::ResourceExhausted(msg)
            | Self::RateLimited(msg) => msg,
        }
    }
}
