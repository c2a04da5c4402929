//! Kinds of errors that can be injected in front of a handler

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, injected_error::InjectedError};

/// The kind of error raised when exception injection fires
///
/// `Generic` is used when no kind is chosen at wrap time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    /// Unspecified failure
    #[default]
    Generic,
    /// A value was rejected
    InvalidValue,
    /// A value had the wrong type
    InvalidType,
    /// An operation ran out of time
    Timeout,
    /// A downstream connection was refused
    ConnectionRefused,
    /// A resource (memory, file handles, quota) was exhausted
    ResourceExhausted,
    /// The caller was throttled
    RateLimited,
}

impl ExceptionKind {
    /// All kinds, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Generic,
        Self::InvalidValue,
        Self::InvalidType,
        Self::Timeout,
        Self::ConnectionRefused,
        Self::ResourceExhausted,
        Self::RateLimited,
    ];

    /// Build the injected error of this kind carrying `message`
    pub fn raise(self, message: impl Into<String>) -> InjectedError {
        let message = message.into();
        match self {
            Self::Generic => InjectedError::Generic(message),
            Self::InvalidValue => InjectedError::InvalidValue(message),
            Self::InvalidType => InjectedError::InvalidType(message),
            Self::Timeout => InjectedError::Timeout(message),
            Self::ConnectionRefused => InjectedError::ConnectionRefused(message),
            Self::ResourceExhausted => InjectedError::ResourceExhausted(message),
            Self::RateLimited => InjectedError::RateLimited(message),
        }
    }

    /// Stable snake_case name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::InvalidValue => "invalid_value",
            Self::InvalidType => "invalid_type",
            Self::Timeout => "timeout",
            Self::ConnectionRefused => "connection_refused",
            Self::ResourceExhausted => "resource_exhausted",
            Self::RateLimited => "rate_limited",
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExceptionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::UnknownExceptionKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_generic() {
        assert_eq!(ExceptionKind::default(), ExceptionKind::Generic);
    }

    #[test]
    fn raise_builds_matching_variant() {
        for kind in ExceptionKind::ALL {
            let err = kind.raise("foobar");
            assert_eq!(err.kind(), kind);
            assert_eq!(err.message(), "foobar");
        }
    }

    #[test]
    fn parses_its_own_name() {
        for kind in ExceptionKind::ALL {
            assert_eq!(kind.to_string().parse::<ExceptionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "INVALID_TYPE".parse::<ExceptionKind>().unwrap(),
            ExceptionKind::InvalidType
        );
    }

    #[test]
    fn parse_unknown_kind_fails() {
        assert!(matches!(
            "segfault".parse::<ExceptionKind>(),
            Err(DomainError::UnknownExceptionKind(name)) if name == "segfault"
        ));
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ExceptionKind::ConnectionRefused).unwrap();
        assert_eq!(json, "\"connection_refused\"");
    }
}
