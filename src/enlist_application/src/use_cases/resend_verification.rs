use enlist_core::{
    Email, PendingRegistration, TtlStore, UserStore, VerificationNotifier, VerificationToken,
    VerificationTokenIssuer,
};

use super::{ensure_not_registered, issue_pending_registration, pending_for_email};
use crate::{error::RegistrationError, pending_registration_repository::PendingRegistrationRepository};

/// Response of a resend request.
///
/// The shape is the same whether or not a pending registration existed, so
/// the endpoint cannot be used to probe for pending signups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    Accepted,
}

/// Resend use case - supersedes the pending registration of an email with a fresh token
pub struct ResendVerificationUseCase<'a, S, U, N, T> {
    pending: &'a PendingRegistrationRepository<S>,
    user_store: &'a U,
    notifier: &'a N,
    token_issuer: &'a T,
}

impl<'a, S, U, N, T> ResendVerificationUseCase<'a, S, U, N, T>
where
    S: TtlStore,
    U: UserStore,
    N: VerificationNotifier,
    T: VerificationTokenIssuer,
{
    pub fn new(
        pending: &'a PendingRegistrationRepository<S>,
        user_store: &'a U,
        notifier: &'a N,
        token_issuer: &'a T,
    ) -> Self {
        Self {
            pending,
            user_store,
            notifier,
            token_issuer,
        }
    }

    /// Execute the resend use case
    ///
    /// # Arguments
    /// * `email` - Address whose pending registration should get a new link
    ///
    /// # Returns
    /// `ResendOutcome::Accepted`, or `AlreadyRegistered` when the email belongs
    /// to a confirmed account, or `DurableStoreUnavailable`. Issuing, storing
    /// and delivering the new link only ever log their failures.
    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<ResendOutcome, RegistrationError> {
        ensure_not_registered(self.user_store, &email).await?;

        let matches = pending_for_email(self.pending, &email).await;
        let Some((_, newest)) = matches.last() else {
            tracing::info!("Resend requested without pending registration");
            return Ok(ResendOutcome::Accepted);
        };

        let record = PendingRegistration::new(
            newest.email.clone(),
            newest.display_name.clone(),
            newest.password.clone(),
        );

        let superseded: Vec<VerificationToken> =
            matches.into_iter().map(|(token, _)| token).collect();
        if let Err(e) = self.pending.delete_many(&superseded).await {
            tracing::warn!(error = %e, "Failed to delete superseded pending registrations");
        }

        // The answer must not depend on whether something was pending, so a
        // failure past this point is only logged.
        match issue_pending_registration(self.pending, self.notifier, self.token_issuer, record)
            .await
        {
            Ok(_) => {
                tracing::info!(superseded = superseded.len(), "Verification link resent");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resend verification link");
            }
        }
        Ok(ResendOutcome::Accepted)
    }
}
