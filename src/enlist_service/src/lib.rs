mod error;
pub mod helpers;
mod registration_service;
pub mod telemetry;

pub use error::ServiceError;
pub use helpers::{configure_postgresql, configure_redis, get_postgres_pool, get_redis_client};
pub use registration_service::{
    ComponentHealth, ConfiguredCoordinator, ConfiguredNotifier, HealthReport, RegistrationService,
};
pub use telemetry::init_tracing;
