use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use enlist_core::{TtlStore, TtlStoreError};
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-process TTL store for development and tests.
///
/// Expiry is enforced on access: `get`, `exists` and `keys_matching` drop
/// the stale entries they touch, and nothing runs in the background. Every
/// mutation happens under the write lock, so a scan never sees a half
/// written entry.
#[derive(Default, Clone)]
pub struct InMemoryTtlStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryTtlStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Entries currently held, expired or not.
    pub async fn raw_len(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn purge_if_expired(&self, key: &str) {
        let mut entries = self.entries.write().await;
        // Another caller may have refreshed the key since the read lock was dropped.
        if entries
            .get(key)
            .is_some_and(|entry| !entry.is_live(Instant::now()))
        {
            entries.remove(key);
            tracing::debug!(key, "Purged expired entry");
        }
    }
}

#[async_trait::async_trait]
impl TtlStore for InMemoryTtlStore {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), TtlStoreError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| TtlStoreError::UnexpectedError("TTL out of range".to_string()))?;

        self.entries
            .write()
            .await
            .insert(key.to_owned(), Entry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, TtlStoreError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Err(TtlStoreError::NotFound),
                Some(entry) if entry.is_live(Instant::now()) => return Ok(entry.value.clone()),
                Some(_) => {}
            }
        }

        self.purge_if_expired(key).await;
        Err(TtlStoreError::Expired)
    }

    async fn delete(&self, keys: &[String]) -> Result<(), TtlStoreError> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, TtlStoreError> {
        match self.get(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_absent() => Ok(false),
            Err(e) => Err(e),
        }
    }

    // Walks the whole map: O(n) in the number of stored entries.
    async fn keys_matching(&self, prefix: &str) -> Result<Vec<String>, TtlStoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired entries during scan");
        }

        Ok(entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), TtlStoreError> {
        Ok(())
    }
}
