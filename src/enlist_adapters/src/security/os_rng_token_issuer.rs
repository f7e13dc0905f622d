use enlist_core::{
    TOKEN_ENTROPY_BYTES, TokenIssuanceError, VerificationToken, VerificationTokenIssuer,
};
use rand::{TryRngCore, rngs::OsRng};

/// Draws every token from the operating system's CSPRNG.
///
/// A failing entropy source is reported, never papered over with a weaker
/// generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngTokenIssuer;

impl OsRngTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl VerificationTokenIssuer for OsRngTokenIssuer {
    fn issue(&self) -> Result<VerificationToken, TokenIssuanceError> {
        let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| TokenIssuanceError(e.to_string()))?;
        Ok(VerificationToken::from_entropy(bytes))
    }
}
