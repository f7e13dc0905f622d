use std::sync::Arc;
use std::time::Duration;

use enlist_adapters::{
    ConfiguredEmailClient, ConfiguredTtlStore, ConfiguredUserStore, EmailVerificationNotifier,
    HashMapUserStore, InMemoryTtlStore, JwtSessionConfig, JwtSessionIssuer, MockEmailClient,
    OsRngTokenIssuer, PostgresUserStore, PostmarkEmailClient, RedisTtlStore,
    config::{RegistrationSettings, TtlBackend},
};
use enlist_application::{PENDING_REGISTRATION_PREFIX, RegistrationCoordinator};
use enlist_core::{Email, TtlStore, UserStore};
use secrecy::Secret;
use tokio::sync::RwLock;

use crate::{ServiceError, configure_postgresql, configure_redis};

pub type ConfiguredNotifier = EmailVerificationNotifier<ConfiguredEmailClient>;

pub type ConfiguredCoordinator = RegistrationCoordinator<
    ConfiguredTtlStore,
    ConfiguredUserStore,
    ConfiguredNotifier,
    OsRngTokenIssuer,
    JwtSessionIssuer,
>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentHealth {
    Up,
    Down(String),
}

impl ComponentHealth {
    pub fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub durable_store: ComponentHealth,
    pub ttl_store: ComponentHealth,
    /// Live pending registrations, when the TTL store could be scanned.
    pub pending_registrations: Option<usize>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.durable_store.is_up() && self.ttl_store.is_up()
    }
}

/// The registration coordinator wired from settings.
#[derive(Clone)]
pub struct RegistrationService {
    coordinator: ConfiguredCoordinator,
}

impl RegistrationService {
    pub fn new(coordinator: ConfiguredCoordinator) -> Self {
        Self { coordinator }
    }

    /// Connects every backend named in `settings` and runs the Postgres
    /// migrations when a durable database is configured.
    #[tracing::instrument(name = "RegistrationService::from_settings", skip_all)]
    pub async fn from_settings(settings: &RegistrationSettings) -> Result<Self, ServiceError> {
        let ttl_store: ConfiguredTtlStore = match settings.ttl_store.backend {
            TtlBackend::InMemory => InMemoryTtlStore::new().into(),
            TtlBackend::Redis => {
                let conn = configure_redis(&settings.redis)?;
                RedisTtlStore::new(Arc::new(RwLock::new(conn))).into()
            }
        };

        let user_store: ConfiguredUserStore = match &settings.postgres {
            Some(postgres) => PostgresUserStore::new(configure_postgresql(postgres).await?).into(),
            None => HashMapUserStore::new().into(),
        };

        let email_client = if settings.email_client.use_mock {
            ConfiguredEmailClient::Mock(MockEmailClient::new())
        } else {
            let sender = Email::try_from(Secret::new(settings.email_client.sender.clone()))
                .map_err(ServiceError::InvalidSender)?;
            let auth_token = settings.email_client.auth_token.clone().ok_or_else(|| {
                ServiceError::EmailClient("missing Postmark auth token".to_string())
            })?;
            ConfiguredEmailClient::Postmark(
                PostmarkEmailClient::new(
                    &settings.email_client.base_url,
                    sender,
                    auth_token,
                    settings.email_client.timeout(),
                )
                .map_err(ServiceError::EmailClient)?,
            )
        };

        let pending_ttl: Duration = settings.ttl_store.pending_ttl();
        let notifier = EmailVerificationNotifier::new(
            email_client,
            settings.application.base_url.clone(),
            pending_ttl,
        );

        let session_issuer = JwtSessionIssuer::new(JwtSessionConfig {
            jwt_secret: settings.session.jwt_secret.clone(),
            token_ttl_in_seconds: settings.session.time_to_live_in_seconds,
        });

        tracing::info!(
            ttl_store = ttl_store.backend_name(),
            user_store = user_store.backend_name(),
            email_client = notifier.email_client().backend_name(),
            "Registration service configured"
        );

        let coordinator = RegistrationCoordinator::new(
            ttl_store,
            user_store,
            notifier,
            OsRngTokenIssuer::new(),
            session_issuer,
        )
        .with_pending_ttl(pending_ttl);

        Ok(Self::new(coordinator))
    }

    pub fn coordinator(&self) -> &ConfiguredCoordinator {
        &self.coordinator
    }

    /// Readiness of both stores. Never fails: each probe failure is reported
    /// in the matching field.
    #[tracing::instrument(name = "RegistrationService::health", skip_all)]
    pub async fn health(&self) -> HealthReport {
        let durable_store = match self.coordinator.user_store().ping().await {
            Ok(()) => ComponentHealth::Up,
            Err(e) => {
                tracing::warn!(error = %e, "Durable store is not reachable");
                ComponentHealth::Down(e.to_string())
            }
        };

        let ttl_store = self.coordinator.pending_registrations().store();
        let ttl_health = match ttl_store.ping().await {
            Ok(()) => ComponentHealth::Up,
            Err(e) => {
                tracing::warn!(error = %e, "TTL store is not reachable");
                ComponentHealth::Down(e.to_string())
            }
        };

        let pending_registrations = if ttl_health.is_up() {
            match ttl_store.keys_matching(PENDING_REGISTRATION_PREFIX).await {
                Ok(keys) => Some(keys.len()),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to count pending registrations");
                    None
                }
            }
        } else {
            None
        };

        HealthReport {
            durable_store,
            ttl_store: ttl_health,
            pending_registrations,
        }
    }
}
