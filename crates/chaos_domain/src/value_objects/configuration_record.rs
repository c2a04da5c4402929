//! Configuration record describing a fault's parameters
//!
//! One record is stored per remote parameter name. The wire format is a JSON
//! object:
//!
//! ```json
//! { "delay": 400, "isEnabled": true, "error_code": 404, "exception_msg": "I FAILED", "rate": 1 }
//! ```
//!
//! Only `isEnabled` is always required. Every other field may be omitted
//! while the record is disabled.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DomainError;

/// Field names of the record schema
pub mod fields {
    /// Injected latency in milliseconds
    pub const DELAY: &str = "delay";
    /// Master switch for the record
    pub const IS_ENABLED: &str = "isEnabled";
    /// Reserved status code field
    pub const ERROR_CODE: &str = "error_code";
    /// Message carried by an injected error
    pub const EXCEPTION_MSG: &str = "exception_msg";
    /// Activation probability in `[0, 1]`
    pub const RATE: &str = "rate";
}

/// A structured configuration record fetched from the parameter store
///
/// The record keeps the raw key/value mapping so that lookups of arbitrary
/// keys behave the same whether or not the key belongs to the schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationRecord(Map<String, Value>);

impl ConfigurationRecord {
    /// Parse a record from its raw JSON document
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DomainError::InvalidRecord(format!("malformed JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Build a record from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Create an enabled record with the given activation rate
    pub fn enabled(rate: f64) -> Self {
        Self::default()
            .with_field(fields::IS_ENABLED, true)
            .with_field(fields::RATE, rate)
    }

    /// Create a disabled record with no companion fields
    pub fn disabled() -> Self {
        Self::default().with_field(fields::IS_ENABLED, false)
    }

    /// Set a field, replacing any previous value
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set the injected delay in milliseconds
    #[must_use]
    pub fn with_delay(self, delay_ms: u64) -> Self {
        self.with_field(fields::DELAY, delay_ms)
    }

    /// Set the reserved error code
    #[must_use]
    pub fn with_error_code(self, code: i64) -> Self {
        self.with_field(fields::ERROR_CODE, code)
    }

    /// Set the message of injected errors
    #[must_use]
    pub fn with_exception_msg(self, msg: impl Into<String>) -> Self {
        self.with_field(fields::EXCEPTION_MSG, msg.into())
    }

    /// Look up a raw field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether a field is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Read the `isEnabled` switch
    pub fn is_enabled(&self) -> Result<bool, DomainError> {
        self.require(fields::IS_ENABLED)?
            .as_bool()
            .ok_or_else(|| DomainError::invalid_field(fields::IS_ENABLED, "must be a boolean"))
    }

    /// Read the activation rate, validated to lie in `[0, 1]`
    pub fn rate(&self) -> Result<f64, DomainError> {
        let rate = self
            .require(fields::RATE)?
            .as_f64()
            .ok_or_else(|| DomainError::invalid_field(fields::RATE, "must be a number"))?;

        if (0.0..=1.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(DomainError::invalid_field(
                fields::RATE,
                format!("{rate} is outside [0, 1]"),
            ))
        }
    }

    /// Read the configured delay in milliseconds
    pub fn delay_ms(&self) -> Result<u64, DomainError> {
        self.require(fields::DELAY)?.as_u64().ok_or_else(|| {
            DomainError::invalid_field(fields::DELAY, "must be a non-negative integer")
        })
    }

    /// Read the reserved error code
    pub fn error_code(&self) -> Result<i64, DomainError> {
        self.require(fields::ERROR_CODE)?
            .as_i64()
            .ok_or_else(|| DomainError::invalid_field(fields::ERROR_CODE, "must be an integer"))
    }

    /// Read the message of injected errors
    pub fn exception_msg(&self) -> Result<&str, DomainError> {
        self.require(fields::EXCEPTION_MSG)?
            .as_str()
            .ok_or_else(|| DomainError::invalid_field(fields::EXCEPTION_MSG, "must be a string"))
    }

    /// Borrow the underlying key/value mapping
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert the record back into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn require(&self, key: &str) -> Result<&Value, DomainError> {
        self.0
            .get(key)
            .ok_or_else(|| DomainError::MissingField(key.to_string()))
    }
}

impl fmt::Display for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl TryFrom<Value> for ConfigurationRecord {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl std::str::FromStr for ConfigurationRecord {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const FULL: &str = r#"{ "delay": 400, "isEnabled": true, "error_code": 404, "exception_msg": "I FAILED", "rate": 1 }"#;

    #[test]
    fn parse_full_record() {
        let record = ConfigurationRecord::parse(FULL).unwrap();
        assert!(record.is_enabled().unwrap());
        assert_eq!(record.delay_ms().unwrap(), 400);
        assert_eq!(record.error_code().unwrap(), 404);
        assert_eq!(record.exception_msg().unwrap(), "I FAILED");
        assert!((record.rate().unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_rejects_non_object() {
        let err = ConfigurationRecord::parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecord(msg) if msg.contains("array")));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = ConfigurationRecord::parse("{ \"isEnabled\": ").unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecord(msg) if msg.starts_with("malformed JSON")));
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let record = ConfigurationRecord::enabled(0.5);
        assert_eq!(
            record.error_code().unwrap_err(),
            DomainError::MissingField("error_code".to_string())
        );
    }

    #[test]
    fn rate_out_of_range_is_rejected() {
        let record = ConfigurationRecord::enabled(1.5);
        assert!(matches!(
            record.rate().unwrap_err(),
            DomainError::InvalidField { field, .. } if field == "rate"
        ));
    }

    #[test]
    fn integer_rate_is_accepted() {
        let record = ConfigurationRecord::from_value(json!({ "isEnabled": true, "rate": 1 })).unwrap();
        assert!((record.rate().unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_delay_is_rejected() {
        let record = ConfigurationRecord::enabled(1.0).with_field(fields::DELAY, -5);
        assert!(matches!(
            record.delay_ms().unwrap_err(),
            DomainError::InvalidField { field, .. } if field == "delay"
        ));
    }

    #[test]
    fn is_enabled_must_be_boolean() {
        let record = ConfigurationRecord::default().with_field(fields::IS_ENABLED, "yes");
        assert!(matches!(
            record.is_enabled().unwrap_err(),
            DomainError::InvalidField { .. }
        ));
    }

    #[test]
    fn disabled_record_has_only_the_switch() {
        let record = ConfigurationRecord::disabled();
        assert!(!record.is_enabled().unwrap());
        assert_eq!(record.as_map().len(), 1);
    }

    #[test]
    fn builder_sets_fields() {
        let record = ConfigurationRecord::enabled(0.25)
            .with_delay(200)
            .with_error_code(503)
            .with_exception_msg("boom");

        assert_eq!(record.get("delay"), Some(&json!(200)));
        assert_eq!(record.get("error_code"), Some(&json!(503)));
        assert_eq!(record.get("exception_msg"), Some(&json!("boom")));
        assert!(record.contains("rate"));
        assert!(!record.contains("dela"));
    }

    #[test]
    fn display_produces_parseable_json() {
        let record = ConfigurationRecord::enabled(0.5).with_delay(10);
        let parsed = ConfigurationRecord::parse(&record.to_string()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn deserializes_transparently() {
        let record: ConfigurationRecord = serde_json::from_str(FULL).unwrap();
        assert_eq!(record.delay_ms().unwrap(), 400);
    }
}
