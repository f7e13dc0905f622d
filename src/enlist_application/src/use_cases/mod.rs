pub mod list_pending;
pub mod resend_verification;
pub mod revoke_pending;
pub mod signup;
pub mod verify_email;

use enlist_core::{
    Email, PendingRegistration, TtlStore, UserStore, VerificationNotifier, VerificationToken,
    VerificationTokenIssuer,
};

use crate::{
    error::RegistrationError,
    pending_registration_repository::{PendingRegistrationError, PendingRegistrationRepository},
};

/// Fails with `AlreadyRegistered` when the durable store already holds `email`.
///
/// An unreachable durable store aborts the request.
pub(crate) async fn ensure_not_registered<U>(
    user_store: &U,
    email: &Email,
) -> Result<(), RegistrationError>
where
    U: UserStore,
{
    match user_store.find_by_email(email).await? {
        Some(_) => Err(RegistrationError::AlreadyRegistered),
        None => Ok(()),
    }
}

/// Best-effort lookup of the pending registrations for `email`.
///
/// The TTL store is only a pre-filter here, so a failing scan is logged and
/// treated as "nothing pending".
pub(crate) async fn pending_for_email<S>(
    pending: &PendingRegistrationRepository<S>,
    email: &Email,
) -> Vec<(VerificationToken, PendingRegistration)>
where
    S: TtlStore,
{
    match pending.find_all_by_email(email).await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Pending registration dedup scan failed, continuing");
            Vec::new()
        }
    }
}

/// Issues a fresh token, stores `record` under it and sends the link.
///
/// A failed delivery leaves the stored record in place so a resend can
/// recover, but still fails the call.
pub(crate) async fn issue_pending_registration<S, N, T>(
    pending: &PendingRegistrationRepository<S>,
    notifier: &N,
    token_issuer: &T,
    record: PendingRegistration,
) -> Result<VerificationToken, RegistrationError>
where
    S: TtlStore,
    N: VerificationNotifier,
    T: VerificationTokenIssuer,
{
    let token = token_issuer.issue()?;

    pending.save(&token, &record).await.map_err(|e| match e {
        PendingRegistrationError::Store(e) => {
            RegistrationError::PendingStoreUnavailable(e.to_string())
        }
        other => RegistrationError::UnexpectedError(other.to_string()),
    })?;

    if let Err(e) = notifier
        .deliver_verification_link(&record.email, &record.display_name, &token)
        .await
    {
        tracing::warn!(error = %e, "Verification link delivery failed, pending registration kept");
        return Err(RegistrationError::NotifierFailure(e));
    }

    Ok(token)
}
