//! Builds stores and resolvers from [`ChaosConfig`]

use std::sync::Arc;
use std::time::Duration;

use chaos_application::{ApplicationError, ConfigResolver, ConfigStorePort};
use tracing::{info, warn};

use crate::{
    adapters::{EnvParameterStore, InMemoryParameterStore, ParameterExtensionStore},
    cache::{CachedConfigStore, CachedConfigStoreConfig},
    config::{ChaosConfig, StoreBackend},
};

/// Create the store selected by `config.store`
///
/// The memory backend starts empty; callers that stage records should
/// construct an [`InMemoryParameterStore`] themselves and pass it to
/// [`build_resolver`].
///
/// # Errors
///
/// Returns an error if the HTTP client for the extension cannot be built.
pub fn build_store(config: &ChaosConfig) -> Result<Arc<dyn ConfigStorePort>, ApplicationError> {
    let store: Arc<dyn ConfigStorePort> = match config.store {
        StoreBackend::Memory => {
            warn!("Using an empty in-memory parameter store");
            Arc::new(InMemoryParameterStore::new())
        },
        StoreBackend::Env => Arc::new(EnvParameterStore::from_config(&config.env)),
        StoreBackend::Extension => Arc::new(ParameterExtensionStore::from_config(&config.extension)?),
    };
    Ok(store)
}

/// Create a resolver for the configured parameter on top of `store`
///
/// The store is wrapped in a [`CachedConfigStore`] when caching is enabled.
///
/// # Errors
///
/// Returns [`ApplicationError::Configuration`] if the configuration does
/// not validate.
pub fn build_resolver(
    config: &ChaosConfig,
    store: Arc<dyn ConfigStorePort>,
) -> Result<Arc<ConfigResolver>, ApplicationError> {
    config.validate()?;
    let parameter = config.parameter_name()?;

    let store: Arc<dyn ConfigStorePort> = if config.cache.enabled {
        Arc::new(CachedConfigStore::with_config(
            store,
            CachedConfigStoreConfig {
                ttl: Duration::from_secs(config.cache.ttl_secs),
                max_entries: config.cache.max_entries,
            },
        ))
    } else {
        store
    };

    info!(
        parameter = %parameter,
        store = %config.store,
        cache = config.cache.enabled,
        "Fault injection resolver ready"
    );
    Ok(Arc::new(ConfigResolver::new(store, parameter)))
}

#[cfg(test)]
mod tests {
    use chaos_domain::ConfigurationRecord;

    use super::*;

    fn memory_config() -> ChaosConfig {
        ChaosConfig::default()
            .with_parameter_name("test.config")
            .with_store(StoreBackend::Memory)
    }

    #[tokio::test]
    async fn resolver_reads_staged_record() {
        let store = InMemoryParameterStore::new();
        store.put_record("test.config", &ConfigurationRecord::enabled(1.0).with_delay(400));

        let resolver = build_resolver(&memory_config(), Arc::new(store)).unwrap();

        assert_eq!(resolver.parameter(), "test.config");
        let (delay, rate) = resolver.resolve_delay().await.unwrap();
        assert_eq!(delay, 400);
        assert!((rate - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn cached_resolver_ignores_later_writes_until_expiry() {
        let store = InMemoryParameterStore::new();
        store.put_record("test.config", &ConfigurationRecord::enabled(1.0).with_delay(400));
        let resolver = build_resolver(&memory_config(), Arc::new(store.clone())).unwrap();

        resolver.resolve_delay().await.unwrap();
        store.put_record("test.config", &ConfigurationRecord::enabled(1.0).with_delay(1));

        assert_eq!(resolver.resolve_delay().await.unwrap().0, 400);
    }

    #[tokio::test]
    async fn uncached_resolver_sees_later_writes() {
        let store = InMemoryParameterStore::new();
        store.put_record("test.config", &ConfigurationRecord::enabled(1.0).with_delay(400));
        let mut config = memory_config();
        config.cache.enabled = false;
        let resolver = build_resolver(&config, Arc::new(store.clone())).unwrap();

        resolver.resolve_delay().await.unwrap();
        store.put_record("test.config", &ConfigurationRecord::enabled(1.0).with_delay(1));

        assert_eq!(resolver.resolve_delay().await.unwrap().0, 1);
    }

    #[test]
    fn missing_parameter_name_is_rejected() {
        let config = ChaosConfig::default().with_store(StoreBackend::Memory);
        let err = build_resolver(&config, Arc::new(InMemoryParameterStore::new())).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn build_store_selects_backend() {
        let memory = build_store(&memory_config()).unwrap();
        assert!(matches!(
            memory.fetch("test.config").await,
            Err(ApplicationError::ParameterNotFound(_))
        ));

        let env = build_store(&memory_config().with_store(StoreBackend::Env)).unwrap();
        assert!(env.is_healthy().await);

        assert!(build_store(&memory_config().with_store(StoreBackend::Extension)).is_ok());
    }
}
