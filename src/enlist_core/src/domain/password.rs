use secrecy::{ExposeSecret, Secret};

use super::validation_error::ValidationError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A clear-text password that satisfies the signup rules.
///
/// It stays in clear text only while the registration is pending; the user
/// store hashes it when the registration is promoted.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = ValidationError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::InvalidPassword(format!(
                "must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for Password {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(Secret::new(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Password {}
