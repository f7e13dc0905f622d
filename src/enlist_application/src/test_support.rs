//! Hand-written port doubles shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

use enlist_core::{
    DisplayName, Email, NewUser, Password, PendingRegistration, SessionIssuer, SessionIssuerError,
    SessionToken, TOKEN_ENTROPY_BYTES, TokenIssuanceError, TtlStore, TtlStoreError, User,
    UserStore, UserStoreError, VerificationNotifier, VerificationToken, VerificationTokenIssuer,
};
use tokio::sync::RwLock;
use tokio::time::Instant;

pub fn token(n: u8) -> VerificationToken {
    VerificationToken::from_entropy([n; TOKEN_ENTROPY_BYTES])
}

pub fn email(value: &str) -> Email {
    Email::try_from(value.to_string()).unwrap()
}

pub fn name(value: &str) -> DisplayName {
    DisplayName::try_from(value.to_string()).unwrap()
}

pub fn password(value: &str) -> Password {
    Password::try_from(value.to_string()).unwrap()
}

pub fn pending_record(address: &str) -> PendingRegistration {
    PendingRegistration::new(email(address), name("Miner"), password("correct-horse"))
}

#[derive(Clone, Default)]
pub struct MockTtlStore {
    entries: Arc<RwLock<HashMap<String, (Vec<u8>, Instant)>>>,
    unavailable: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockTtlStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, value: bool) {
        self.fail_writes.store(value, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, value: bool) {
        self.fail_deletes.store(value, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    fn check(&self) -> Result<(), TtlStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TtlStoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TtlStore for MockTtlStore {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), TtlStoreError> {
        self.check()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TtlStoreError::Unavailable("read only".to_string()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, TtlStoreError> {
        self.check()?;
        let mut entries = self.entries.write().await;
        let Some((value, expires_at)) = entries.get(key).cloned() else {
            return Err(TtlStoreError::NotFound);
        };
        if Instant::now() >= expires_at {
            entries.remove(key);
            return Err(TtlStoreError::Expired);
        }
        Ok(value)
    }

    async fn delete(&self, keys: &[String]) -> Result<(), TtlStoreError> {
        self.check()?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(TtlStoreError::Unavailable("delete refused".to_string()));
        }
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

    async fn keys_matching(&self, prefix: &str) -> Result<Vec<String>, TtlStoreError> {
        self.check()?;
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, (_, expires_at)| now < *expires_at);
        Ok(entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), TtlStoreError> {
        self.check()
    }
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
    unavailable: Arc<AtomicBool>,
    // Pretend the dedup lookup misses so the unique constraint has to catch it.
    blind_lookups: Arc<AtomicBool>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }

    pub fn set_blind_lookups(&self, value: bool) {
        self.blind_lookups.store(value, Ordering::SeqCst);
    }

    pub async fn insert(&self, user: NewUser) {
        self.users
            .write()
            .await
            .insert(user.email.clone(), user.to_user());
    }

    pub async fn count_with_email(&self, email: &Email) -> usize {
        self.users
            .read()
            .await
            .values()
            .filter(|user| &user.email == email)
            .count()
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UserStoreError::Unavailable("pool timed out".to_string()));
        }
        if self.blind_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UserStoreError::Unavailable("pool timed out".to_string()));
        }
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let created = user.to_user();
        users.insert(user.email, created.clone());
        Ok(created)
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UserStoreError::Unavailable("pool timed out".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub email: Email,
    pub display_name: DisplayName,
    pub token: VerificationToken,
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    deliveries: Arc<RwLock<Vec<Delivery>>>,
    failing: Arc<AtomicBool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, value: bool) {
        self.failing.store(value, Ordering::SeqCst);
    }

    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.read().await.clone()
    }
}

#[async_trait::async_trait]
impl VerificationNotifier for MockNotifier {
    async fn deliver_verification_link(
        &self,
        email: &Email,
        display_name: &DisplayName,
        token: &VerificationToken,
    ) -> Result<(), String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err("smtp connection reset".to_string());
        }
        self.deliveries.write().await.push(Delivery {
            email: email.clone(),
            display_name: display_name.clone(),
            token: token.clone(),
        });
        Ok(())
    }
}

/// Hands out `token(1)`, `token(2)`, ... in order.
#[derive(Clone, Default)]
pub struct SequentialTokenIssuer {
    next: Arc<AtomicU8>,
    failing: Arc<AtomicBool>,
}

impl SequentialTokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, value: bool) {
        self.failing.store(value, Ordering::SeqCst);
    }
}

impl VerificationTokenIssuer for SequentialTokenIssuer {
    fn issue(&self) -> Result<VerificationToken, TokenIssuanceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TokenIssuanceError("getrandom failed".to_string()));
        }
        Ok(token(self.next.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

#[derive(Clone, Default)]
pub struct StaticSessionIssuer;

impl SessionIssuer for StaticSessionIssuer {
    fn issue_session(&self, user: &User) -> Result<SessionToken, SessionIssuerError> {
        Ok(SessionToken::new(format!("session-for-{}", user.id)))
    }
}
