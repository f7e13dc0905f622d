use enlist_core::{TtlStore, VerificationToken};

use crate::{error::RegistrationError, pending_registration_repository::PendingRegistrationRepository};

/// Revoke use case - expires a pending registration ahead of its TTL
pub struct RevokePendingUseCase<'a, S> {
    pending: &'a PendingRegistrationRepository<S>,
}

impl<'a, S> RevokePendingUseCase<'a, S>
where
    S: TtlStore,
{
    pub fn new(pending: &'a PendingRegistrationRepository<S>) -> Self {
        Self { pending }
    }

    /// Execute the revoke use case
    ///
    /// # Returns
    /// Whether a live pending registration was removed. Revoking an unknown
    /// or already expired token is not an error.
    #[tracing::instrument(name = "RevokePendingUseCase::execute", skip_all)]
    pub async fn execute(&self, token: VerificationToken) -> Result<bool, RegistrationError> {
        let unavailable = |e: crate::PendingRegistrationError| {
            RegistrationError::PendingStoreUnavailable(e.to_string())
        };

        let existed = self.pending.exists(&token).await.map_err(unavailable)?;
        self.pending.delete(&token).await.map_err(unavailable)?;

        if existed {
            tracing::info!("Pending registration revoked");
        }
        Ok(existed)
    }
}
