pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    display_name::DisplayName,
    email::Email,
    password::Password,
    pending_registration::{PendingRegistration, PendingSummary},
    session_token::SessionToken,
    user::{NewUser, User},
    validation_error::ValidationError,
    verification_token::{TOKEN_ENTROPY_BYTES, VerificationToken},
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{
        EmailClient, SessionIssuer, SessionIssuerError, TokenIssuanceError, VerificationNotifier,
        VerificationTokenIssuer,
    },
    ttl_store::{TtlStore, TtlStoreError},
};
