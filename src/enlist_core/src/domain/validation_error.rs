use thiserror::Error;

/// Rejections produced while parsing registration input into domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
    #[error("Invalid display name: {0}")]
    InvalidDisplayName(String),
    #[error("Malformed verification token")]
    MalformedToken,
}
