use super::validation_error::ValidationError;

pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

/// The name shown to other players and used in the confirmation mail greeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidDisplayName(
                "must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(ValidationError::InvalidDisplayName(format!(
                "must be at most {MAX_DISPLAY_NAME_LENGTH} characters long"
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
