use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use enlist_core::Password;
use secrecy::{ExposeSecret, Secret};

/// Argon2id hash in PHC string form, plus the salt it embeds.
pub struct HashedPassword {
    pub hash: Secret<String>,
    pub salt: String,
}

fn hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: Password) -> Result<HashedPassword, String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || -> Result<HashedPassword, String> {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hash = hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map_err(|e| e.to_string())?;
            Ok(HashedPassword {
                hash: Secret::new(hash.to_string()),
                salt: salt.as_str().to_owned(),
            })
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| -> Result<(), String> {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            hasher()?
                .verify_password(
                    password_candidate.as_ref().expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(value: &str) -> Password {
        Password::try_from(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn hash_verifies_against_the_original_password() {
        let hashed = compute_password_hash(password("correct-horse")).await.unwrap();

        assert!(hashed.hash.expose_secret().starts_with("$argon2id$"));
        assert!(hashed.hash.expose_secret().contains(&hashed.salt));
        assert!(
            verify_password_hash(hashed.hash, password("correct-horse"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let hashed = compute_password_hash(password("correct-horse")).await.unwrap();

        assert!(
            verify_password_hash(hashed.hash, password("battery-staple"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let first = compute_password_hash(password("correct-horse")).await.unwrap();
        let second = compute_password_hash(password("correct-horse")).await.unwrap();

        assert_ne!(first.salt, second.salt);
    }
}
