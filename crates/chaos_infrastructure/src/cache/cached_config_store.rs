//! TTL cache in front of a configuration store
//!
//! Records are cached per parameter name for a fixed time to live, so a
//! handler invoked many times per second does not hit the parameter service
//! on every call. Failed lookups are never cached.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chaos_application::{ApplicationError, ConfigStorePort};
use chaos_domain::ConfigurationRecord;
use moka::future::Cache;
use tracing::{debug, instrument};

use super::CacheStats;

/// Configuration for [`CachedConfigStore`]
#[derive(Debug, Clone, Copy)]
pub struct CachedConfigStoreConfig {
    /// How long a fetched record stays valid
    pub ttl: Duration,
    /// Maximum number of cached parameters
    pub max_entries: u64,
}

impl Default for CachedConfigStoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 64,
        }
    }
}

/// Configuration store decorator with a moka TTL cache
pub struct CachedConfigStore {
    inner: Arc<dyn ConfigStorePort>,
    cache: Cache<String, ConfigurationRecord>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for CachedConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedConfigStore")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl CachedConfigStore {
    /// Wrap `inner` with the default cache configuration
    pub fn new(inner: Arc<dyn ConfigStorePort>) -> Self {
        Self::with_config(inner, CachedConfigStoreConfig::default())
    }

    /// Wrap `inner` with a custom cache configuration
    pub fn with_config(inner: Arc<dyn ConfigStorePort>, config: CachedConfigStoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();

        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drop the cached record for `name`
    pub async fn invalidate(&self, name: &str) {
        self.cache.invalidate(name).await;
        debug!(parameter = %name, "Cached record invalidated");
    }

    /// Drop every cached record
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Current cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}

#[async_trait]
impl ConfigStorePort for CachedConfigStore {
    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, name: &str) -> Result<ConfigurationRecord, ApplicationError> {
        if let Some(record) = self.cache.get(name).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(parameter = %name, "Cache hit");
            return Ok(record);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(parameter = %name, "Cache miss");

        let record = self.inner.fetch(name).await?;
        self.cache.insert(name.to_string(), record.clone()).await;
        Ok(record)
    }

    async fn is_healthy(&self) -> bool {
        self.inner.is_healthy().await
    }
}
