use enlist_core::{
    DisplayName, Email, Password, PendingRegistration, TtlStore, UserStore, VerificationNotifier,
    VerificationToken, VerificationTokenIssuer,
};

use super::{ensure_not_registered, issue_pending_registration, pending_for_email};
use crate::{error::RegistrationError, pending_registration_repository::PendingRegistrationRepository};

/// Result of an accepted signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub email: Email,
    /// Also delivered to the user by the notifier.
    pub token: VerificationToken,
}

/// Signup use case - parks a new registration until its email is confirmed
pub struct SignupUseCase<'a, S, U, N, T> {
    pending: &'a PendingRegistrationRepository<S>,
    user_store: &'a U,
    notifier: &'a N,
    token_issuer: &'a T,
}

impl<'a, S, U, N, T> SignupUseCase<'a, S, U, N, T>
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

    /// Execute the signup use case
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `display_name` - Validated display name
    /// * `password` - Validated password, kept in clear text until promotion
    ///
    /// # Returns
    /// The issued token, or `AlreadyRegistered` / `ConfirmationPending` when the
    /// email is taken, or an infrastructure error
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        display_name: DisplayName,
        password: Password,
    ) -> Result<SignupOutcome, RegistrationError> {
        ensure_not_registered(self.user_store, &email).await?;

        if !pending_for_email(self.pending, &email).await.is_empty() {
            return Err(RegistrationError::ConfirmationPending);
        }

        let record = PendingRegistration::new(email.clone(), display_name, password);
        let token =
            issue_pending_registration(self.pending, self.notifier, self.token_issuer, record)
                .await?;

        tracing::info!("Pending registration created");
        Ok(SignupOutcome { email, token })
    }
}
