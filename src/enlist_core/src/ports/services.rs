use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    display_name::DisplayName, email::Email, session_token::SessionToken, user::User,
    verification_token::VerificationToken,
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

/// Delivers the confirmation link of a pending registration.
#[async_trait]
pub trait VerificationNotifier: Send + Sync {
    async fn deliver_verification_link(
        &self,
        email: &Email,
        display_name: &DisplayName,
        token: &VerificationToken,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
#[error("Entropy source failure: {0}")]
pub struct TokenIssuanceError(pub String);

/// Source of fresh verification tokens. A token is never handed out twice.
pub trait VerificationTokenIssuer: Send + Sync {
    fn issue(&self) -> Result<VerificationToken, TokenIssuanceError>;
}

#[derive(Debug, Error)]
pub enum SessionIssuerError {
    #[error("Failed to sign session token: {0}")]
    Signing(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Issues the session artifact returned after a successful promotion.
pub trait SessionIssuer: Send + Sync {
    fn issue_session(&self, user: &User) -> Result<SessionToken, SessionIssuerError>;
}
