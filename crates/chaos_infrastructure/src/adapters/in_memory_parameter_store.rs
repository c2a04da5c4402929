//! In-memory parameter store
//!
//! Holds raw parameter documents keyed by name, the same way the remote
//! store does. Used for local runs and tests, where records are staged with
//! `put_parameter` and removed with `delete_parameter`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chaos_application::{ApplicationError, ConfigStorePort};
use chaos_domain::ConfigurationRecord;
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Parameter store backed by a shared in-memory map
///
/// Clones share the same parameters.
#[derive(Debug, Clone, Default)]
pub struct InMemoryParameterStore {
    parameters: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw document under `name`, overwriting any previous value
    pub fn put_parameter(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        debug!(parameter = %name, "Parameter stored");
        self.parameters.write().insert(name, value.into());
    }

    /// Store a record under `name`, overwriting any previous value
    pub fn put_record(&self, name: impl Into<String>, record: &ConfigurationRecord) {
        self.put_parameter(name, record.to_string());
    }

    /// Remove the parameter; returns whether it existed
    pub fn delete_parameter(&self, name: &str) -> bool {
        self.parameters.write().remove(name).is_some()
    }

    /// Remove several parameters; returns how many existed
    pub fn delete_parameters(&self, names: &[&str]) -> usize {
        let mut parameters = self.parameters.write();
        names
            .iter()
            .filter(|name| parameters.remove(**name).is_some())
            .count()
    }

    /// Check whether a parameter exists
    pub fn contains(&self, name: &str) -> bool {
        self.parameters.read().contains_key(name)
    }

    /// Number of stored parameters
    pub fn len(&self) -> usize {
        self.parameters.read().len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.read().is_empty()
    }
}

#[async_trait]
impl ConfigStorePort for InMemoryParameterStore {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, name: &str) -> Result<ConfigurationRecord, ApplicationError> {
        let raw = self
            .parameters
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ApplicationError::ParameterNotFound(name.to_string()))?;

        ConfigurationRecord::parse(&raw)
            .map_err(|e| ApplicationError::invalid_record(name, e.to_string()))
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
