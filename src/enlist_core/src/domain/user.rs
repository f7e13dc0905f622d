use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{display_name::DisplayName, email::Email, password::Password};

/// A confirmed account as read back from the durable store.
///
/// Password hash and salt stay inside the store adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub display_name: DisplayName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input of a promotion: identity is assigned up front, the password is
/// hashed by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: Email,
    pub display_name: DisplayName,
    pub password: Password,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: Email, display_name: DisplayName, password: Password) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password,
            created_at: Utc::now(),
        }
    }

    /// The record the store persists, minus the credentials.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
