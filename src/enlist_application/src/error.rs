use enlist_core::{SessionIssuerError, TokenIssuanceError, UserStoreError};
use thiserror::Error;

/// Terminal result of a registration operation, as seen by the caller.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("This email address is already registered")]
    AlreadyRegistered,
    #[error("A confirmation for this email address is already pending")]
    ConfirmationPending,
    #[error("Invalid or expired verification token")]
    InvalidOrExpiredToken,
    #[error("Durable user store unavailable: {0}")]
    DurableStoreUnavailable(String),
    #[error("Pending registration store unavailable: {0}")]
    PendingStoreUnavailable(String),
    #[error("Failed to issue verification token: {0}")]
    TokenIssuanceFailure(String),
    #[error("Failed to deliver verification link: {0}")]
    NotifierFailure(String),
    #[error("Failed to issue session: {0}")]
    SessionIssuanceFailure(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for RegistrationError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<UserStoreError> for RegistrationError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => Self::AlreadyRegistered,
            UserStoreError::Unavailable(e) => Self::DurableStoreUnavailable(e),
            UserStoreError::UnexpectedError(e) => Self::UnexpectedError(e),
        }
    }
}

impl From<TokenIssuanceError> for RegistrationError {
    fn from(error: TokenIssuanceError) -> Self {
        Self::TokenIssuanceFailure(error.0)
    }
}

impl From<SessionIssuerError> for RegistrationError {
    fn from(error: SessionIssuerError) -> Self {
        Self::SessionIssuanceFailure(error.to_string())
    }
}
