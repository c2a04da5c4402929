//! Environment-based parameter store adapter
//!
//! Reads parameter documents from environment variables. Useful for local
//! development and containerized deployments where the record is injected
//! via environment instead of a remote parameter service.

use std::env;

use async_trait::async_trait;
use chaos_application::{ApplicationError, ConfigStorePort};
use chaos_domain::ConfigurationRecord;
use tracing::{debug, instrument, warn};

use crate::config::EnvStoreConfig;

/// Parameter store that reads from environment variables
///
/// Names are uppercased with `.`, `/` and `-` replaced by underscores.
/// For example: "chaos/test.config" becomes "CHAOS_TEST_CONFIG"
#[derive(Debug, Clone, Default)]
pub struct EnvParameterStore {
    /// Optional prefix for all environment variable lookups
    prefix: Option<String>,
}

impl EnvParameterStore {
    /// Create a new environment parameter store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a prefix for all environment variable lookups
    ///
    /// # Example
    /// ```
    /// use chaos_infrastructure::EnvParameterStore;
    ///
    /// let store = EnvParameterStore::with_prefix("FAILURE");
    /// // Looking up "test.config" will check "FAILURE_TEST_CONFIG"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Create from loaded configuration
    pub fn from_config(config: &EnvStoreConfig) -> Self {
        config
            .prefix
            .as_ref()
            .map_or_else(Self::new, |prefix| Self::with_prefix(prefix.clone()))
    }

    /// Transform a parameter name to an environment variable name
    fn name_to_env_var(&self, name: &str) -> String {
        let normalized = name.replace(['/', '-', '.'], "_").to_uppercase();

        match &self.prefix {
            Some(prefix) => format!("{prefix}_{normalized}"),
            None => normalized,
        }
    }
}

#[async_trait]
impl ConfigStorePort for EnvParameterStore {
    #[instrument(skip(self), fields(env_var))]
    async fn fetch(&self, name: &str) -> Result<ConfigurationRecord, ApplicationError> {
        let env_var = self.name_to_env_var(name);
        tracing::Span::current().record("env_var", &env_var);

        match env::var(&env_var) {
            Ok(raw) => {
                debug!("Retrieved parameter from environment variable");
                ConfigurationRecord::parse(&raw)
                    .map_err(|e| ApplicationError::invalid_record(name, e.to_string()))
            },
            Err(env::VarError::NotPresent) => {
                warn!(env_var = %env_var, "Parameter not found in environment");
                Err(ApplicationError::ParameterNotFound(name.to_string()))
            },
            Err(env::VarError::NotUnicode(_)) => Err(ApplicationError::Configuration(format!(
                "Parameter contains invalid UTF-8: {env_var}"
            ))),
        }
    }

    async fn is_healthy(&self) -> bool {
        // Environment variables are always accessible
        true
    }
}
