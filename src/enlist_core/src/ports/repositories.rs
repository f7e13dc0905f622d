use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    user::{NewUser, User},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User store unavailable: {0}")]
    Unavailable(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::Unavailable(_), Self::Unavailable(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Durable home of confirmed accounts. Email uniqueness is enforced here and
/// nowhere else.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    /// Fails with `UserAlreadyExists` when the email is taken, however the
    /// conflict was detected.
    async fn create_user(&self, user: NewUser) -> Result<User, UserStoreError>;
    async fn ping(&self) -> Result<(), UserStoreError>;
}
