//! Port for fetching configuration records
//!
//! Implementations may read from an in-memory map, the process environment,
//! or a remote parameter service, and may put a TTL cache in front.

use std::sync::Arc;

use async_trait::async_trait;
use chaos_domain::ConfigurationRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for named configuration record lookups
///
/// Implementations must fail with [`ApplicationError::ParameterNotFound`]
/// when the name is unknown to the store, so callers can tell a missing
/// parameter apart from a missing field inside an existing record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfigStorePort: Send + Sync {
    /// Fetch the record stored under `name`
    async fn fetch(&self, name: &str) -> Result<ConfigurationRecord, ApplicationError>;

    /// Check if the store is reachable
    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl<T: ConfigStorePort + ?Sized> ConfigStorePort for Arc<T> {
    async fn fetch(&self, name: &str) -> Result<ConfigurationRecord, ApplicationError> {
        (**self).fetch(name).await
    }

    async fn is_healthy(&self) -> bool {
        (**self).is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ConfigStorePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ConfigStorePort>();
    }

    #[tokio::test]
    async fn mock_distinguishes_missing_parameter() {
        let mut store = MockConfigStorePort::new();
        store
            .expect_fetch()
            .returning(|name| Err(ApplicationError::ParameterNotFound(name.to_string())));

        let result = store.fetch("test.conf").await;
        assert!(matches!(result, Err(ApplicationError::ParameterNotFound(name)) if name == "test.conf"));
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_store() {
        let mut store = MockConfigStorePort::new();
        store
            .expect_fetch()
            .returning(|_| Ok(ConfigurationRecord::disabled()));
        store.expect_is_healthy().returning(|| true);

        let shared: Arc<dyn ConfigStorePort> = Arc::new(store);
        assert_eq!(shared.fetch("any").await.unwrap(), ConfigurationRecord::disabled());
        assert!(shared.is_healthy().await);
    }
}
