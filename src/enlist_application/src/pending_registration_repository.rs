use std::time::Duration;

use chrono::{DateTime, Utc};
use enlist_core::{
    DisplayName, Email, Password, PendingRegistration, TtlStore, TtlStoreError, VerificationToken,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace of pending registrations inside the TTL store.
pub const PENDING_REGISTRATION_PREFIX: &str = "email_verification:";

/// How long an unconfirmed signup stays claimable.
pub const PENDING_REGISTRATION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum PendingRegistrationError {
    #[error("Pending registration not found")]
    NotFound,
    #[error("Pending registration could not be decoded: {0}")]
    Corrupted(String),
    #[error("TTL store error: {0}")]
    Store(TtlStoreError),
}

impl From<TtlStoreError> for PendingRegistrationError {
    fn from(error: TtlStoreError) -> Self {
        if error.is_absent() {
            Self::NotFound
        } else {
            Self::Store(error)
        }
    }
}

// Persisted JSON shape; field names are part of the storage format.
#[derive(Serialize, Deserialize)]
struct StoredPendingRegistration {
    email: String,
    name: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl From<&PendingRegistration> for StoredPendingRegistration {
    fn from(record: &PendingRegistration) -> Self {
        Self {
            email: record.email.as_str().to_owned(),
            name: record.display_name.as_str().to_owned(),
            password: record.password.as_ref().expose_secret().clone(),
            created_at: record.created_at,
        }
    }
}

impl TryFrom<StoredPendingRegistration> for PendingRegistration {
    type Error = PendingRegistrationError;

    fn try_from(stored: StoredPendingRegistration) -> Result<Self, Self::Error> {
        let corrupted = |e: enlist_core::ValidationError| {
            PendingRegistrationError::Corrupted(e.to_string())
        };
        Ok(Self {
            email: Email::try_from(Secret::new(stored.email)).map_err(corrupted)?,
            display_name: DisplayName::try_from(stored.name).map_err(corrupted)?,
            password: Password::try_from(Secret::new(stored.password)).map_err(corrupted)?,
            created_at: stored.created_at,
        })
    }
}

/// Pending registrations keyed by verification token.
///
/// There is no email → token index: email lookups enumerate the whole
/// namespace and decode every entry, so they cost O(n) in the number of
/// pending registrations.
#[derive(Clone)]
pub struct PendingRegistrationRepository<S> {
    store: S,
    ttl: Duration,
}

impl<S> PendingRegistrationRepository<S>
where
    S: TtlStore,
{
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, PENDING_REGISTRATION_TTL)
    }

    pub fn with_ttl(store: S, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    #[tracing::instrument(name = "PendingRegistrationRepository::save", skip_all)]
    pub async fn save(
        &self,
        token: &VerificationToken,
        record: &PendingRegistration,
    ) -> Result<(), PendingRegistrationError> {
        let value = serde_json::to_vec(&StoredPendingRegistration::from(record))
            .map_err(|e| PendingRegistrationError::Corrupted(e.to_string()))?;

        self.store.set(&storage_key(token), value, self.ttl).await?;
        Ok(())
    }

    #[tracing::instrument(name = "PendingRegistrationRepository::find", skip_all)]
    pub async fn find(
        &self,
        token: &VerificationToken,
    ) -> Result<PendingRegistration, PendingRegistrationError> {
        let value = self.store.get(&storage_key(token)).await?;
        decode(&value)
    }

    pub async fn exists(&self, token: &VerificationToken) -> Result<bool, PendingRegistrationError> {
        Ok(self.store.exists(&storage_key(token)).await?)
    }

    #[tracing::instrument(name = "PendingRegistrationRepository::delete", skip_all)]
    pub async fn delete(&self, token: &VerificationToken) -> Result<(), PendingRegistrationError> {
        self.delete_many(std::slice::from_ref(token)).await
    }

    pub async fn delete_many(
        &self,
        tokens: &[VerificationToken],
    ) -> Result<(), PendingRegistrationError> {
        if tokens.is_empty() {
            return Ok(());
        }
        let keys: Vec<String> = tokens.iter().map(storage_key).collect();
        self.store.delete(&keys).await?;
        Ok(())
    }

    /// First live pending registration for `email`.
    pub async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<(VerificationToken, PendingRegistration), PendingRegistrationError> {
        self.find_all_by_email(email)
            .await?
            .into_iter()
            .next()
            .ok_or(PendingRegistrationError::NotFound)
    }

    /// Every live pending registration for `email`, oldest first.
    ///
    /// More than one can exist when two signups raced past the dedup check.
    #[tracing::instrument(name = "PendingRegistrationRepository::find_all_by_email", skip_all)]
    pub async fn find_all_by_email(
        &self,
        email: &Email,
    ) -> Result<Vec<(VerificationToken, PendingRegistration)>, PendingRegistrationError> {
        let mut matches: Vec<_> = self
            .scan()
            .await?
            .into_iter()
            .filter(|(_, record)| &record.email == email)
            .collect();
        matches.sort_by_key(|(_, record)| record.created_at);
        Ok(matches)
    }

    /// Fresh scan of every decodable pending registration.
    #[tracing::instrument(name = "PendingRegistrationRepository::list_all", skip_all)]
    pub async fn list_all(
        &self,
    ) -> Result<Vec<(VerificationToken, PendingRegistration)>, PendingRegistrationError> {
        self.scan().await
    }

    async fn scan(
        &self,
    ) -> Result<Vec<(VerificationToken, PendingRegistration)>, PendingRegistrationError> {
        let keys = self
            .store
            .keys_matching(PENDING_REGISTRATION_PREFIX)
            .await
            .map_err(PendingRegistrationError::Store)?;

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(token) = token_from_key(&key) else {
                tracing::warn!(key = %key, "Skipping pending registration with malformed key");
                continue;
            };

            let value = match self.store.get(&key).await {
                Ok(value) => value,
                // Expired between enumeration and read.
                Err(e) if e.is_absent() => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read pending registration, skipping");
                    continue;
                }
            };

            match decode(&value) {
                Ok(record) => records.push((token, record)),
                Err(e) => {
                    tracing::warn!(error = %e, token = ?token, "Skipping undecodable pending registration");
                }
            }
        }
        Ok(records)
    }
}

pub(crate) fn storage_key(token: &VerificationToken) -> String {
    format!("{}{}", PENDING_REGISTRATION_PREFIX, token.as_str())
}

fn token_from_key(key: &str) -> Option<VerificationToken> {
    key.strip_prefix(PENDING_REGISTRATION_PREFIX)
        .and_then(|suffix| VerificationToken::parse(suffix).ok())
}

fn decode(value: &[u8]) -> Result<PendingRegistration, PendingRegistrationError> {
    let stored: StoredPendingRegistration = serde_json::from_slice(value)
        .map_err(|e| PendingRegistrationError::Corrupted(e.to_string()))?;
    PendingRegistration::try_from(stored)
}
