use secrecy::{ExposeSecret, Secret};

/// Authenticated session artifact handed back after a successful promotion.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
