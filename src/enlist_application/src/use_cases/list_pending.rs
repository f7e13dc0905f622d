use enlist_core::{PendingSummary, TtlStore};

use crate::{error::RegistrationError, pending_registration_repository::PendingRegistrationRepository};

/// List pending use case - operator view of unconfirmed signups
pub struct ListPendingUseCase<'a, S> {
    pending: &'a PendingRegistrationRepository<S>,
}

impl<'a, S> ListPendingUseCase<'a, S>
where
    S: TtlStore,
{
    pub fn new(pending: &'a PendingRegistrationRepository<S>) -> Self {
        Self { pending }
    }

    /// Undecodable entries are left out instead of failing the listing.
    #[tracing::instrument(name = "ListPendingUseCase::execute", skip_all)]
    pub async fn execute(&self) -> Result<Vec<PendingSummary>, RegistrationError> {
        let mut summaries: Vec<PendingSummary> = self
            .pending
            .list_all()
            .await
            .map_err(|e| RegistrationError::PendingStoreUnavailable(e.to_string()))?
            .into_iter()
            .map(|(token, record)| PendingSummary::new(token, &record))
            .collect();

        summaries.sort_by_key(|summary| summary.created_at);
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockTtlStore, email, pending_record, token};

    #[tokio::test]
    async fn test_list_pending_returns_summaries() {
        let pending = PendingRegistrationRepository::new(MockTtlStore::new());
        pending
            .save(&token(1), &pending_record("a@x.com"))
            .await
            .unwrap();
        pending
            .save(&token(2), &pending_record("b@x.com"))
            .await
            .unwrap();

        let summaries = ListPendingUseCase::new(&pending).execute().await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert!(
            summaries
                .iter()
                .any(|s| s.token == token(1) && s.email == email("a@x.com"))
        );
        assert!(
            summaries
                .iter()
                .any(|s| s.token == token(2) && s.email == email("b@x.com"))
        );
    }

    #[tokio::test]
    async fn test_list_pending_is_restartable() {
        let pending = PendingRegistrationRepository::new(MockTtlStore::new());
        pending
            .save(&token(1), &pending_record("a@x.com"))
            .await
            .unwrap();
        let use_case = ListPendingUseCase::new(&pending);

        let first = use_case.execute().await.unwrap();
        let second = use_case.execute().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_pending_store_unavailable() {
        let store = MockTtlStore::new();
        store.set_unavailable(true);
        let pending = PendingRegistrationRepository::new(store);

        let result = ListPendingUseCase::new(&pending).execute().await;

        assert!(matches!(
            result,
            Err(RegistrationError::PendingStoreUnavailable(_))
        ));
    }
}
