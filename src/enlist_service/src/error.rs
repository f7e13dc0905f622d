use enlist_adapters::config::SettingsError;
use enlist_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Postgres error: {0}")]
    Postgres(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Invalid email sender: {0}")]
    InvalidSender(ValidationError),
    #[error("Email client error: {0}")]
    EmailClient(String),
}
