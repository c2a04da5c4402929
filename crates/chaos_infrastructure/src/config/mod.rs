//! Fault injection configuration
//!
//! Loaded in layers: built-in defaults, an optional `chaos.toml`, `CHAOS_*`
//! environment variables (nested keys separated by `__`, e.g.
//! `CHAOS_CACHE__TTL_SECS`), and finally `FAILURE_INJECTION_PARAM`, which
//! names the parameter holding the active record.

use std::fmt;
use std::path::Path;

use chaos_application::ApplicationError;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// Environment variable naming the parameter that holds the active record
pub const PARAMETER_ENV_VAR: &str = "FAILURE_INJECTION_PARAM";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "CHAOS";

/// Configuration file looked up by [`ChaosConfig::load`]
const CONFIG_FILE: &str = "chaos";

const fn default_true() -> bool {
    true
}

/// Where configuration records are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map, staged by the caller
    Memory,
    /// One environment variable per parameter
    Env,
    /// Local HTTP parameters extension
    #[default]
    Extension,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Env => write!(f, "env"),
            Self::Extension => write!(f, "extension"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "env" | "environment" => Ok(Self::Env),
            "extension" | "ssm" => Ok(Self::Extension),
            _ => Err(format!(
                "Invalid store: {s}. Use 'memory', 'env' or 'extension'"
            )),
        }
    }
}

/// Record cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache fetched records
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds a fetched record stays valid
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached parameters
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_ttl_secs() -> u64 {
    300
}

const fn default_max_entries() -> u64 {
    64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

/// Parameters extension settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Base URL of the extension
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Environment variable holding the session token sent to the extension
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_endpoint() -> String {
    "http://localhost:2773".to_string()
}

const fn default_timeout_ms() -> u64 {
    1000
}

fn default_token_env() -> String {
    "AWS_SESSION_TOKEN".to_string()
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            token_env: default_token_env(),
        }
    }
}

/// Environment store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvStoreConfig {
    /// Prefix prepended to every derived variable name
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Top-level fault injection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Name of the parameter holding the active record
    #[serde(default)]
    pub parameter_name: Option<String>,

    /// Store backend
    #[serde(default)]
    pub store: StoreBackend,

    /// Record cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Parameters extension (used when `store = "extension"`)
    #[serde(default)]
    pub extension: ExtensionConfig,

    /// Environment store (used when `store = "env"`)
    #[serde(default)]
    pub env: EnvStoreConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ChaosConfig {
    /// Load from `chaos.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("parameter_name", std::env::var(PARAMETER_ENV_VAR).ok())?;

        builder.build()?.try_deserialize()
    }

    /// Load from a single file, without consulting the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or does not deserialize.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(true))
            .build()?
            .try_deserialize()
    }

    /// Load from TOML text, without consulting the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not deserialize.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Set the parameter name
    #[must_use]
    pub fn with_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = Some(name.into());
        self
    }

    /// Set the store backend
    #[must_use]
    pub const fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    /// The configured parameter name
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] when no non-empty name
    /// is configured.
    pub fn parameter_name(&self) -> Result<&str, ApplicationError> {
        match self.parameter_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ApplicationError::Configuration(format!(
                "No parameter name configured; set {PARAMETER_ENV_VAR}"
            ))),
        }
    }

    /// Check the configuration for values that cannot work
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.parameter_name()?;

        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(ApplicationError::Configuration(
                "cache.ttl_secs must be greater than zero when caching is enabled".to_string(),
            ));
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(ApplicationError::Configuration(
                "cache.max_entries must be greater than zero when caching is enabled".to_string(),
            ));
        }

        if self.store == StoreBackend::Extension {
            if self.extension.endpoint.trim().is_empty() {
                return Err(ApplicationError::Configuration(
                    "extension.endpoint must not be empty".to_string(),
                ));
            }
            if self.extension.timeout_ms == 0 {
                return Err(ApplicationError::Configuration(
                    "extension.timeout_ms must be greater than zero".to_string(),
                ));
            }
        }

        Ok(())
    }
}
