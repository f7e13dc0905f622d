//! # Enlist - Deferred Registration Library
//!
//! Facade crate that re-exports the public API of the registration
//! components. A signup is parked in a TTL store until the emailed link is
//! followed; only then is the account written to the durable store.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! enlist = { path = "../enlist" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `DisplayName`, `VerificationToken`, etc.
//! - **Ports**: `TtlStore`, `UserStore`, `VerificationNotifier`, `VerificationTokenIssuer`
//! - **Application**: `PendingRegistrationRepository`, the use cases and `RegistrationCoordinator`
//! - **Adapters**: in-memory and Redis TTL stores, HashMap and Postgres user stores, mail clients
//! - **Service**: `RegistrationService`, wired from `RegistrationSettings`

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use enlist_core::*;
}

pub use enlist_core::{
    DisplayName, Email, NewUser, Password, PendingRegistration, PendingSummary, SessionToken,
    User, ValidationError, VerificationToken,
};

// ============================================================================
// Ports
// ============================================================================

pub use enlist_core::{
    EmailClient, SessionIssuer, SessionIssuerError, TokenIssuanceError, TtlStore, TtlStoreError,
    UserStore, UserStoreError, VerificationNotifier, VerificationTokenIssuer,
};

// ============================================================================
// Application Layer
// ============================================================================

/// Repository, use cases and coordinator
pub mod application {
    pub use enlist_application::*;
}

pub use enlist_application::{
    PendingRegistrationRepository, RegistrationCoordinator, RegistrationError, ResendOutcome,
    SignupOutcome, VerifiedRegistration,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// TTL and user store implementations
    pub mod persistence {
        pub use enlist_adapters::persistence::*;
    }

    /// Email client and notifier implementations
    pub mod email {
        pub use enlist_adapters::email::*;
    }

    /// Token and session issuers
    pub mod security {
        pub use enlist_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use enlist_adapters::config::*;
    }
}

pub use enlist_adapters::{
    EmailVerificationNotifier, HashMapUserStore, InMemoryTtlStore, JwtSessionIssuer,
    MockEmailClient, OsRngTokenIssuer, PostgresUserStore, PostmarkEmailClient, RedisTtlStore,
    config::RegistrationSettings,
};

// ============================================================================
// Registration Service (Main Entry Point)
// ============================================================================

pub use enlist_service::{
    HealthReport, RegistrationService, ServiceError, configure_postgresql, configure_redis,
    get_redis_client, init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
