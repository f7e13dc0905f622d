use std::time::Duration;

use enlist_core::{
    DisplayName, Email, Password, PendingSummary, SessionIssuer, TtlStore, UserStore,
    VerificationNotifier, VerificationToken, VerificationTokenIssuer,
};

use crate::{
    error::RegistrationError,
    pending_registration_repository::PendingRegistrationRepository,
    use_cases::{
        list_pending::ListPendingUseCase,
        resend_verification::{ResendOutcome, ResendVerificationUseCase},
        revoke_pending::RevokePendingUseCase,
        signup::{SignupOutcome, SignupUseCase},
        verify_email::{VerifiedRegistration, VerifyEmailUseCase},
    },
};

/// Entry point of the deferred registration flow.
///
/// ```text
/// Anonymous --signup--> PendingVerification --verify--> Verified
///                            |   ^
///                     resend |   | new token
///                            v   |
///                          Superseded
/// PendingVerification --ttl elapsed / revoke--> Expired
/// ```
///
/// There is no transaction spanning the TTL store and the durable store. The
/// dedup checks only produce friendlier errors; the durable store's unique
/// email constraint decides every race.
#[derive(Clone)]
pub struct RegistrationCoordinator<S, U, N, T, A> {
    pending: PendingRegistrationRepository<S>,
    user_store: U,
    notifier: N,
    token_issuer: T,
    session_issuer: A,
}

impl<S, U, N, T, A> RegistrationCoordinator<S, U, N, T, A>
where
    S: TtlStore,
    U: UserStore,
    N: VerificationNotifier,
    T: VerificationTokenIssuer,
    A: SessionIssuer,
{
    pub fn new(
        ttl_store: S,
        user_store: U,
        notifier: N,
        token_issuer: T,
        session_issuer: A,
    ) -> Self {
        Self {
            pending: PendingRegistrationRepository::new(ttl_store),
            user_store,
            notifier,
            token_issuer,
            session_issuer,
        }
    }

    /// Overrides how long pending registrations stay claimable.
    pub fn with_pending_ttl(self, ttl: Duration) -> Self {
        let Self {
            pending,
            user_store,
            notifier,
            token_issuer,
            session_issuer,
        } = self;
        let store = pending.into_store();
        Self {
            pending: PendingRegistrationRepository::with_ttl(store, ttl),
            user_store,
            notifier,
            token_issuer,
            session_issuer,
        }
    }

    pub fn pending_registrations(&self) -> &PendingRegistrationRepository<S> {
        &self.pending
    }

    pub fn user_store(&self) -> &U {
        &self.user_store
    }

    pub async fn signup(
        &self,
        email: Email,
        display_name: DisplayName,
        password: Password,
    ) -> Result<SignupOutcome, RegistrationError> {
        SignupUseCase::new(
            &self.pending,
            &self.user_store,
            &self.notifier,
            &self.token_issuer,
        )
        .execute(email, display_name, password)
        .await
    }

    /// Accepts the raw token from a confirmation link.
    pub async fn verify(&self, token: &str) -> Result<VerifiedRegistration, RegistrationError> {
        let token = VerificationToken::parse(token)
            .map_err(|_| RegistrationError::InvalidOrExpiredToken)?;

        VerifyEmailUseCase::new(&self.pending, &self.user_store, &self.session_issuer)
            .execute(token)
            .await
    }

    pub async fn resend(&self, email: Email) -> Result<ResendOutcome, RegistrationError> {
        ResendVerificationUseCase::new(
            &self.pending,
            &self.user_store,
            &self.notifier,
            &self.token_issuer,
        )
        .execute(email)
        .await
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingSummary>, RegistrationError> {
        ListPendingUseCase::new(&self.pending).execute().await
    }

    /// Returns whether a live pending registration was removed. Malformed
    /// tokens cannot name one, so they are a no-op.
    pub async fn revoke(&self, token: &str) -> Result<bool, RegistrationError> {
        let Ok(token) = VerificationToken::parse(token) else {
            return Ok(false);
        };
        RevokePendingUseCase::new(&self.pending).execute(token).await
    }
}
