use std::time::Duration;

use enlist_core::{TtlStore, TtlStoreError};

use super::{in_memory_ttl_store::InMemoryTtlStore, redis_ttl_store::RedisTtlStore};

/// TTL store chosen once at startup from configuration.
#[derive(Clone)]
pub enum ConfiguredTtlStore {
    InMemory(InMemoryTtlStore),
    Redis(RedisTtlStore),
}

impl ConfiguredTtlStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "in_memory",
            Self::Redis(_) => "redis",
        }
    }

    fn inner(&self) -> &dyn TtlStore {
        match self {
            Self::InMemory(store) => store,
            Self::Redis(store) => store,
        }
    }
}

impl From<InMemoryTtlStore> for ConfiguredTtlStore {
    fn from(store: InMemoryTtlStore) -> Self {
        Self::InMemory(store)
    }
}

impl From<RedisTtlStore> for ConfiguredTtlStore {
    fn from(store: RedisTtlStore) -> Self {
        Self::Redis(store)
    }
}

#[async_trait::async_trait]
impl TtlStore for ConfiguredTtlStore {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), TtlStoreError> {
        self.inner().set(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, TtlStoreError> {
        self.inner().get(key).await
    }

    async fn delete(&self, keys: &[String]) -> Result<(), TtlStoreError> {
        self.inner().delete(keys).await
    }

    async fn exists(&self, key: &str) -> Result<bool, TtlStoreError> {
        self.inner().exists(key).await
    }

    async fn keys_matching(&self, prefix: &str) -> Result<Vec<String>, TtlStoreError> {
        self.inner().keys_matching(prefix).await
    }

    async fn ping(&self) -> Result<(), TtlStoreError> {
        self.inner().ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_variant_delegates() {
        let store = ConfiguredTtlStore::from(InMemoryTtlStore::new());

        store
            .set("k", b"v".to_vec(), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(store.backend_name(), "in_memory");
        assert_eq!(store.get("k").await.unwrap(), b"v".to_vec());
        assert_eq!(store.keys_matching("k").await.unwrap(), vec!["k".to_string()]);
    }
}
