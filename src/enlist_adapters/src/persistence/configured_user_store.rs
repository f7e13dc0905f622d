use enlist_core::{Email, NewUser, User, UserStore, UserStoreError};

use super::{hashmap_user_store::HashMapUserStore, postgres_user_store::PostgresUserStore};

/// Durable user store chosen once at startup from configuration.
#[derive(Clone)]
pub enum ConfiguredUserStore {
    InMemory(HashMapUserStore),
    Postgres(PostgresUserStore),
}

impl ConfiguredUserStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "in_memory",
            Self::Postgres(_) => "postgres",
        }
    }

    fn inner(&self) -> &dyn UserStore {
        match self {
            Self::InMemory(store) => store,
            Self::Postgres(store) => store,
        }
    }
}

impl From<HashMapUserStore> for ConfiguredUserStore {
    fn from(store: HashMapUserStore) -> Self {
        Self::InMemory(store)
    }
}

impl From<PostgresUserStore> for ConfiguredUserStore {
    fn from(store: PostgresUserStore) -> Self {
        Self::Postgres(store)
    }
}

#[async_trait::async_trait]
impl UserStore for ConfiguredUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        self.inner().find_by_email(email).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        self.inner().create_user(user).await
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        self.inner().ping().await
    }
}
