use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use super::validation_error::ValidationError;

/// Number of random bytes behind every verification token (256 bits).
pub const TOKEN_ENTROPY_BYTES: usize = 32;

const ENCODED_TOKEN_LENGTH: usize = 43;

/// Unguessable, URL-safe handle of a pending registration.
///
/// The token is the only way to address a pending registration: it is the
/// cache key, and it is what the confirmation link carries.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VerificationToken(String);

impl VerificationToken {
    /// Encodes freshly drawn entropy into a token.
    pub fn from_entropy(bytes: [u8; TOKEN_ENTROPY_BYTES]) -> Self {
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Parses a token received from the outside world (a confirmation link,
    /// an admin request or a storage key suffix).
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.len() != ENCODED_TOKEN_LENGTH {
            return Err(ValidationError::MalformedToken);
        }
        match URL_SAFE_NO_PAD.decode(value) {
            Ok(bytes) if bytes.len() == TOKEN_ENTROPY_BYTES => Ok(Self(value.to_owned())),
            _ => Err(ValidationError::MalformedToken),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VerificationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Only a short prefix is printed so tokens never end up whole in logs.
impl std::fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "VerificationToken({prefix}...)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_token_is_url_safe_and_fixed_length() {
        let token = VerificationToken::from_entropy([0xfb; TOKEN_ENTROPY_BYTES]);
        assert_eq!(token.as_str().len(), ENCODED_TOKEN_LENGTH);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[quickcheck_macros::quickcheck]
    fn any_entropy_produces_a_parseable_token(seed: Vec<u8>) -> bool {
        let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
        for (slot, value) in bytes.iter_mut().zip(seed) {
            *slot = value;
        }
        let token = VerificationToken::from_entropy(bytes);
        VerificationToken::parse(token.as_str()) == Ok(token)
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            VerificationToken::parse("abc"),
            Err(ValidationError::MalformedToken)
        );
    }

    #[test]
    fn standard_alphabet_is_rejected() {
        let value = "+".repeat(ENCODED_TOKEN_LENGTH);
        assert_eq!(
            VerificationToken::parse(&value),
            Err(ValidationError::MalformedToken)
        );
    }

    #[test]
    fn debug_output_is_truncated() {
        let token = VerificationToken::from_entropy([7; TOKEN_ENTROPY_BYTES]);
        assert!(!format!("{token:?}").contains(token.as_str()));
    }
}
