use std::sync::Arc;
use std::time::Duration;

use enlist_core::{TtlStore, TtlStoreError};
use redis::{Commands, Connection};
use tokio::sync::RwLock;

/// TTL store backed by Redis, which enforces expiry itself.
///
/// Redis cannot tell a never-set key from an expired one, so `get` only
/// ever reports `NotFound`.
#[derive(Clone)]
pub struct RedisTtlStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisTtlStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl TtlStore for RedisTtlStore {
    #[tracing::instrument(name = "Redis SET", skip_all)]
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), TtlStoreError> {
        let millis = u64::try_from(ttl.as_millis())
            .map_err(|_| TtlStoreError::UnexpectedError("TTL out of range".to_string()))?;

        let mut conn = self.conn.write().await;
        if millis == 0 {
            // Redis rejects a zero expiry; the entry would be dead on arrival anyway.
            return conn.del::<_, ()>(key).map_err(unavailable);
        }
        conn.pset_ex::<_, _, ()>(key, value, millis)
            .map_err(unavailable)
    }

    #[tracing::instrument(name = "Redis GET", skip_all)]
    async fn get(&self, key: &str) -> Result<Vec<u8>, TtlStoreError> {
        let mut conn = self.conn.write().await;
        let value: Option<Vec<u8>> = conn.get(key).map_err(unavailable)?;
        value.ok_or(TtlStoreError::NotFound)
    }

    #[tracing::instrument(name = "Redis DEL", skip_all)]
    async fn delete(&self, keys: &[String]) -> Result<(), TtlStoreError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.write().await;
        conn.del::<_, ()>(keys).map_err(unavailable)
    }

    async fn exists(&self, key: &str) -> Result<bool, TtlStoreError> {
        let mut conn = self.conn.write().await;
        conn.exists(key).map_err(unavailable)
    }

    // KEYS walks the whole keyspace: O(n) in the size of the database.
    #[tracing::instrument(name = "Redis KEYS", skip_all)]
    async fn keys_matching(&self, prefix: &str) -> Result<Vec<String>, TtlStoreError> {
        let pattern = format!("{}*", escape_glob(prefix));
        let mut conn = self.conn.write().await;
        conn.keys(pattern).map_err(unavailable)
    }

    async fn ping(&self) -> Result<(), TtlStoreError> {
        let mut conn = self.conn.write().await;
        redis::cmd("PING")
            .query::<String>(&mut *conn)
            .map(|_| ())
            .map_err(unavailable)
    }
}

fn unavailable(e: redis::RedisError) -> TtlStoreError {
    TtlStoreError::Unavailable(e.to_string())
}

/// Escapes glob metacharacters so `prefix` is matched literally.
fn escape_glob(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
