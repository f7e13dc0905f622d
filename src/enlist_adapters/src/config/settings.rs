use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    BASE_CONFIG_FILE, CONFIG_DIRECTORY, DEFAULT_ENVIRONMENT, defaults,
    env::{APP_ENVIRONMENT_ENV_VAR, SETTINGS_ENV_PREFIX, SETTINGS_ENV_SEPARATOR},
    prod,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(String),
    #[error("Failed to parse settings: {0}")]
    Parse(String),
    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Runtime configuration of the registration service.
///
/// Read from `config/base.json`, then `config/{APP_ENVIRONMENT}.json`, then
/// `ENLIST__*` environment variables, later sources winning. Only
/// `session.jwt_secret` has no default.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSettings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub ttl_store: TtlStoreSettings,
    #[serde(default)]
    pub redis: RedisSettings,
    /// Without a Postgres section users are kept in memory.
    #[serde(default)]
    pub postgres: Option<PostgresSettings>,
    pub session: SessionSettings,
    #[serde(default)]
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    /// Origin the confirmation links point at.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            environment: default_environment(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlBackend {
    #[default]
    InMemory,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TtlStoreSettings {
    #[serde(default)]
    pub backend: TtlBackend,
    #[serde(default = "default_pending_ttl")]
    pub pending_ttl_in_seconds: u64,
}

impl TtlStoreSettings {
    pub fn pending_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_ttl_in_seconds)
    }
}

impl Default for TtlStoreSettings {
    fn default() -> Self {
        Self {
            backend: TtlBackend::default(),
            pending_ttl_in_seconds: default_pending_ttl(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    #[serde(default = "default_redis_host_name")]
    pub host_name: String,
    #[serde(default = "default_redis_port")]
    pub port: u16,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

impl RedisSettings {
    /// `redis://` URL of the server, with the password percent-encoded.
    pub fn connection_url(&self) -> Result<String, SettingsError> {
        let invalid = |reason: String| SettingsError::Invalid {
            field: "redis",
            reason,
        };

        let mut url = Url::parse(&format!("redis://{}:{}/", self.host_name, self.port))
            .map_err(|e| invalid(e.to_string()))?;
        if let Some(password) = &self.password {
            url.set_password(Some(password.expose_secret()))
                .map_err(|_| invalid("cannot carry a password".to_string()))?;
        }
        Ok(url.to_string())
    }
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host_name: default_redis_host_name(),
            port: default_redis_port(),
            password: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub jwt_secret: Secret<String>,
    #[serde(default = "default_session_ttl")]
    pub time_to_live_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    #[serde(default = "default_sender")]
    pub sender: String,
    #[serde(default)]
    pub auth_token: Option<Secret<String>>,
    #[serde(default = "default_email_timeout")]
    pub timeout_in_millis: u64,
    /// Captures mail in memory instead of calling Postmark.
    #[serde(default = "default_use_mock")]
    pub use_mock: bool,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

impl Default for EmailClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_email_base_url(),
            sender: default_sender(),
            auth_token: None,
            timeout_in_millis: default_email_timeout(),
            use_mock: default_use_mock(),
        }
    }
}

impl RegistrationSettings {
    /// Loads settings for the environment named by `APP_ENVIRONMENT`,
    /// reading a `.env` file first when present.
    pub fn load() -> Result<Self, SettingsError> {
        // A missing .env file is the normal case outside development.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
        Self::load_from(Path::new(CONFIG_DIRECTORY), &environment)
    }

    pub fn load_from(config_dir: &Path, environment: &str) -> Result<Self, SettingsError> {
        let base = config_dir.join(BASE_CONFIG_FILE);
        let overlay = config_dir.join(environment);

        let settings: Self = config::Config::builder()
            .add_source(config::File::with_name(&base.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(SETTINGS_ENV_PREFIX)
                    .separator(SETTINGS_ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SettingsError::Load(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SettingsError::Parse(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.session.jwt_secret.expose_secret().is_empty() {
            return Err(SettingsError::Invalid {
                field: "session.jwt_secret",
                reason: "must not be empty".to_string(),
            });
        }
        if self.ttl_store.pending_ttl_in_seconds == 0 {
            return Err(SettingsError::Invalid {
                field: "ttl_store.pending_ttl_in_seconds",
                reason: "must be positive".to_string(),
            });
        }
        if !self.email_client.use_mock && self.email_client.auth_token.is_none() {
            return Err(SettingsError::Invalid {
                field: "email_client.auth_token",
                reason: "required unless email_client.use_mock is set".to_string(),
            });
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    defaults::BASE_URL.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_pending_ttl() -> u64 {
    defaults::PENDING_TTL_IN_SECONDS
}

fn default_redis_host_name() -> String {
    defaults::REDIS_HOST_NAME.to_string()
}

fn default_redis_port() -> u16 {
    defaults::REDIS_PORT
}

fn default_max_connections() -> u32 {
    defaults::POSTGRES_MAX_CONNECTIONS
}

fn default_session_ttl() -> i64 {
    defaults::SESSION_TTL_IN_SECONDS
}

fn default_email_base_url() -> String {
    prod::email_client::BASE_URL.to_string()
}

fn default_sender() -> String {
    prod::email_client::SENDER.to_string()
}

fn default_email_timeout() -> u64 {
    prod::email_client::TIMEOUT_IN_MILLIS
}

fn default_use_mock() -> bool {
    true
}
