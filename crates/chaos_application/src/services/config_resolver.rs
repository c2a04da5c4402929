//! Configuration resolution for fault injection
//!
//! Fetches the record for one named parameter and answers per-key lookups.
//! A disabled record short-circuits every lookup to `(0, 0)` without looking
//! at any other field, so operators can leave companion fields out of a
//! disabled record.

use std::fmt;
use std::sync::Arc;

use chaos_domain::{ConfigurationRecord, DomainError, fields};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::ConfigStorePort};

/// Outcome of a key lookup against the active record
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// `isEnabled` is false; no other field was read
    Disabled,
    /// `isEnabled` is true; the requested value and the record's rate
    Enabled { value: Value, rate: f64 },
}

impl Lookup {
    /// Flatten into the `(value, rate)` pair, `(0, 0)` when disabled
    pub fn into_pair(self) -> (Value, f64) {
        match self {
            Self::Disabled => (Value::from(0), 0.0),
            Self::Enabled { value, rate } => (value, rate),
        }
    }

    /// Check whether the record was disabled
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// Resolves configuration values for one parameter name
///
/// The parameter name is fixed at construction. Every lookup fetches the
/// record through the store, which may serve it from a cache.
pub struct ConfigResolver {
    store: Arc<dyn ConfigStorePort>,
    parameter: String,
}

impl fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}

impl ConfigResolver {
    /// Create a resolver for `parameter` backed by `store`
    pub fn new(store: Arc<dyn ConfigStorePort>, parameter: impl Into<String>) -> Self {
        Self {
            store,
            parameter: parameter.into(),
        }
    }

    /// Name of the parameter this resolver reads
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// Fetch the current record
    pub async fn record(&self) -> Result<ConfigurationRecord, ApplicationError> {
        self.store.fetch(&self.parameter).await
    }

    /// Fetch the record, or `None` when it is disabled
    ///
    /// Disabled records skip all field validation, including `rate`.
    async fn enabled_record(&self) -> Result<Option<ConfigurationRecord>, ApplicationError> {
        let record = self.record().await?;
        if record.is_enabled().map_err(|e| self.record_error(e))? {
            Ok(Some(record))
        } else {
            debug!("Record disabled, short-circuiting lookup");
            Ok(None)
        }
    }

    fn rate_of(&self, record: &ConfigurationRecord) -> Result<f64, ApplicationError> {
        record.rate().map_err(|e| self.record_error(e))
    }

    /// Look up `key`, applying the disabled-state short-circuit
    #[instrument(skip(self), fields(parameter = %self.parameter), level = "debug")]
    pub async fn lookup(&self, key: &str) -> Result<Lookup, ApplicationError> {
        let Some(record) = self.enabled_record().await? else {
            return Ok(Lookup::Disabled);
        };

        if key == fields::RATE {
            let rate = self.rate_of(&record)?;
            return Ok(Lookup::Enabled {
                value: Value::from(rate),
                rate,
            });
        }

        let value = record
            .get(key)
            .cloned()
            .ok_or_else(|| ApplicationError::KeyLookup(key.to_string()))?;
        let rate = self.rate_of(&record)?;

        debug!(rate, "Resolved configuration value");
        Ok(Lookup::Enabled { value, rate })
    }

    /// Resolve `key` to `(value, rate)`; `(0, 0)` when the record is disabled
    pub async fn resolve(&self, key: &str) -> Result<(Value, f64), ApplicationError> {
        Ok(self.lookup(key).await?.into_pair())
    }

    /// Resolve the configured delay in milliseconds
    #[instrument(skip(self), fields(parameter = %self.parameter), level = "debug")]
    pub async fn resolve_delay(&self) -> Result<(u64, f64), ApplicationError> {
        let Some(record) = self.enabled_record().await? else {
            return Ok((0, 0.0));
        };
        let delay = record.delay_ms().map_err(|e| self.record_error(e))?;
        Ok((delay, self.rate_of(&record)?))
    }

    /// Resolve the configured message of injected errors
    #[instrument(skip(self), fields(parameter = %self.parameter), level = "debug")]
    pub async fn resolve_exception_msg(&self) -> Result<(String, f64), ApplicationError> {
        let Some(record) = self.enabled_record().await? else {
            return Ok((String::new(), 0.0));
        };
        let msg = record
            .exception_msg()
            .map_err(|e| self.record_error(e))?
            .to_string();
        Ok((msg, self.rate_of(&record)?))
    }

    /// Resolve the reserved error code
    #[instrument(skip(self), fields(parameter = %self.parameter), level = "debug")]
    pub async fn resolve_error_code(&self) -> Result<(i64, f64), ApplicationError> {
        let Some(record) = self.enabled_record().await? else {
            return Ok((0, 0.0));
        };
        let code = record.error_code().map_err(|e| self.record_error(e))?;
        Ok((code, self.rate_of(&record)?))
    }

    fn record_error(&self, err: DomainError) -> ApplicationError {
        match err {
            DomainError::MissingField(field) => ApplicationError::KeyLookup(field),
            other => ApplicationError::invalid_record(&self.parameter, other.to_string()),
        }
    }
}
