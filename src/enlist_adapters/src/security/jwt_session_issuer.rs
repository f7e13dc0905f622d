use chrono::Utc;
use enlist_core::{SessionIssuer, SessionIssuerError, SessionToken, User};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct JwtSessionConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtSessionConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs an HS256 session token for a freshly promoted user.
#[derive(Clone)]
pub struct JwtSessionIssuer {
    config: JwtSessionConfig,
}

impl JwtSessionIssuer {
    pub fn new(config: JwtSessionConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, token: &str) -> Result<SessionClaims, SessionIssuerError> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| SessionIssuerError::Signing(e.to_string()))
    }
}

impl SessionIssuer for JwtSessionIssuer {
    fn issue_session(&self, user: &User) -> Result<SessionToken, SessionIssuerError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            SessionIssuerError::UnexpectedError(
                "Failed to create session token duration".to_string(),
            ),
        )?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or(SessionIssuerError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.as_str().to_owned(),
            iat: now.timestamp(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map(SessionToken::new)
        .map_err(|e| SessionIssuerError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enlist_core::{DisplayName, Email, NewUser, Password};

    fn issuer(ttl: i64) -> JwtSessionIssuer {
        JwtSessionIssuer::new(JwtSessionConfig {
            jwt_secret: Secret::new("secret".to_owned()),
            token_ttl_in_seconds: ttl,
        })
    }

    fn user() -> User {
        NewUser::new(
            Email::try_from(Secret::new("miner@example.com".to_owned())).unwrap(),
            DisplayName::try_from("Miner".to_owned()).unwrap(),
            Password::try_from(Secret::new("correct-horse".to_owned())).unwrap(),
        )
        .to_user()
    }

    #[test]
    fn issued_session_carries_the_user() {
        let issuer = issuer(600);
        let user = user();

        let token = issuer.issue_session(&user).unwrap();
        let claims = issuer.validate(token.expose()).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "miner@example.com");
        let expected_exp = Utc::now().timestamp() + 600;
        assert!((claims.exp - expected_exp).abs() <= 1);
        assert!(claims.iat <= claims.exp);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issuer(600).issue_session(&user()).unwrap();
        let other = JwtSessionIssuer::new(JwtSessionConfig {
            jwt_secret: Secret::new("other".to_owned()),
            token_ttl_in_seconds: 600,
        });

        assert!(other.validate(token.expose()).is_err());
    }

    #[test]
    fn expired_session_is_rejected() {
        let token = issuer(-3600).issue_session(&user()).unwrap();

        assert!(issuer(600).validate(token.expose()).is_err());
    }
}
