pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    ApplicationSettings, EmailClientSettings, PostgresSettings, RedisSettings,
    RegistrationSettings, SessionSettings, SettingsError, TtlBackend, TtlStoreSettings,
};
