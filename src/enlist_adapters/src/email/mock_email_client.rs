use std::sync::Arc;

use enlist_core::{Email, EmailClient};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub recipient: Email,
    pub subject: String,
    pub content: String,
}

/// Keeps every message in memory instead of sending it.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    outbox: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }

    pub async fn last_sent_to(&self, recipient: &Email) -> Option<SentEmail> {
        self.outbox
            .read()
            .await
            .iter()
            .rev()
            .find(|mail| &mail.recipient == recipient)
            .cloned()
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        tracing::debug!(subject, "Captured outgoing email");
        self.outbox.write().await.push(SentEmail {
            recipient: recipient.clone(),
            subject: subject.to_owned(),
            content: content.to_owned(),
        });
        Ok(())
    }
}
