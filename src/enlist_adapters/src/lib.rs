pub mod config;
pub mod email;
pub mod persistence;
pub mod security;

pub use email::{
    ConfiguredEmailClient, EmailVerificationNotifier, MockEmailClient, PostmarkEmailClient,
    SentEmail,
};
pub use persistence::{
    ConfiguredTtlStore, ConfiguredUserStore, HashMapUserStore, InMemoryTtlStore,
    PostgresUserStore, RedisTtlStore,
};
pub use security::{JwtSessionConfig, JwtSessionIssuer, OsRngTokenIssuer, SessionClaims};
