use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use enlist_core::{Email, NewUser, Password, User, UserStore, UserStoreError};
use secrecy::Secret;

use super::password_hashing::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
struct StoredUser {
    user: User,
    password_hash: Secret<String>,
}

/// Durable-store stand-in for development and tests. Enforces the same
/// email uniqueness as the Postgres store.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Checks `password` against the stored hash of `email`.
    pub async fn password_matches(&self, email: &Email, password: &Password) -> bool {
        let Some(stored) = self.users.read().await.get(email).cloned() else {
            return false;
        };
        verify_password_hash(stored.password_hash, password.clone())
            .await
            .is_ok()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.get(email).map(|stored| stored.user.clone()))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let hashed = compute_password_hash(user.password.clone())
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let created = user.to_user();
        users.insert(
            user.email,
            StoredUser {
                user: created.clone(),
                password_hash: hashed.hash,
            },
        );
        Ok(created)
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        Ok(())
    }
}
