pub mod coordinator;
pub mod error;
pub mod pending_registration_repository;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::RegistrationCoordinator;
pub use error::RegistrationError;
pub use pending_registration_repository::{
    PENDING_REGISTRATION_PREFIX, PENDING_REGISTRATION_TTL, PendingRegistrationError,
    PendingRegistrationRepository,
};
pub use use_cases::{
    list_pending::ListPendingUseCase,
    resend_verification::{ResendOutcome, ResendVerificationUseCase},
    revoke_pending::RevokePendingUseCase,
    signup::{SignupOutcome, SignupUseCase},
    verify_email::{VerifiedRegistration, VerifyEmailUseCase},
};
