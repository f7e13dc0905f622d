use enlist_core::{
    NewUser, SessionIssuer, SessionToken, TtlStore, User, UserStore, VerificationToken,
};

use super::ensure_not_registered;
use crate::{
    error::RegistrationError,
    pending_registration_repository::{PendingRegistrationError, PendingRegistrationRepository},
};

/// A promoted registration together with its first session.
#[derive(Debug, Clone)]
pub struct VerifiedRegistration {
    pub user: User,
    pub session: SessionToken,
}

/// Verify email use case - promotes a pending registration into a durable user
pub struct VerifyEmailUseCase<'a, S, U, A> {
    pending: &'a PendingRegistrationRepository<S>,
    user_store: &'a U,
    session_issuer: &'a A,
}

impl<'a, S, U, A> VerifyEmailUseCase<'a, S, U, A>
where
    S: TtlStore,
    U: UserStore,
    A: SessionIssuer,
{
    pub fn new(
        pending: &'a PendingRegistrationRepository<S>,
        user_store: &'a U,
        session_issuer: &'a A,
    ) -> Self {
        Self {
            pending,
            user_store,
            session_issuer,
        }
    }

    /// Execute the verify email use case
    ///
    /// Unknown and expired tokens are reported identically so a caller cannot
    /// learn whether a token ever existed.
    ///
    /// # Returns
    /// The new user and a session, or `InvalidOrExpiredToken` /
    /// `AlreadyRegistered`, or an infrastructure error
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: VerificationToken,
    ) -> Result<VerifiedRegistration, RegistrationError> {
        let record = match self.pending.find(&token).await {
            Ok(record) => record,
            Err(PendingRegistrationError::NotFound) => {
                return Err(RegistrationError::InvalidOrExpiredToken);
            }
            Err(PendingRegistrationError::Corrupted(e)) => {
                tracing::warn!(error = %e, "Pending registration is unreadable");
                return Err(RegistrationError::InvalidOrExpiredToken);
            }
            Err(PendingRegistrationError::Store(e)) => {
                return Err(RegistrationError::PendingStoreUnavailable(e.to_string()));
            }
        };

        // Courtesy check; the store's unique constraint is what settles races.
        ensure_not_registered(self.user_store, &record.email).await?;

        let user = self
            .user_store
            .create_user(NewUser::new(
                record.email,
                record.display_name,
                record.password,
            ))
            .await?;

        // A stale record cannot be promoted twice and expires on its own.
        if let Err(e) = self.pending.delete(&token).await {
            tracing::warn!(error = %e, "Failed to delete promoted pending registration");
        }

        let session = self.session_issuer.issue_session(&user)?;

        tracing::info!(user_id = %user.id, "Registration verified");
        Ok(VerifiedRegistration { user, session })
    }
}
