use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TtlStoreError {
    #[error("Key not found")]
    NotFound,
    #[error("Key expired")]
    Expired,
    #[error("TTL store unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl TtlStoreError {
    /// `NotFound` and `Expired` mean the same thing to callers.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::NotFound | Self::Expired)
    }
}

impl PartialEq for TtlStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::NotFound, Self::NotFound)
                | (Self::Expired, Self::Expired)
                | (Self::Unavailable(_), Self::Unavailable(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Key-value store whose entries disappear once their time-to-live elapses.
///
/// An entry is observable only while `now < expires_at`. Implementations may
/// reclaim expired entries lazily, but must never return one.
#[async_trait]
pub trait TtlStore: Send + Sync {
    /// Unconditional upsert; resets the expiry to `now + ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), TtlStoreError>;

    /// Fails with `NotFound` for unknown keys and `Expired` for stale ones.
    async fn get(&self, key: &str) -> Result<Vec<u8>, TtlStoreError>;

    /// Idempotent; absent keys are ignored.
    async fn delete(&self, keys: &[String]) -> Result<(), TtlStoreError>;

    async fn exists(&self, key: &str) -> Result<bool, TtlStoreError>;

    /// Every live key starting with `prefix`.
    ///
    /// O(n) in the number of entries held by the store, not in the number of
    /// matches.
    async fn keys_matching(&self, prefix: &str) -> Result<Vec<String>, TtlStoreError>;

    /// Round trip used by readiness checks.
    async fn ping(&self) -> Result<(), TtlStoreError>;
}
