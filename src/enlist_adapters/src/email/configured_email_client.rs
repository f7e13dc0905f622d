use enlist_core::{Email, EmailClient};

use super::{MockEmailClient, PostmarkEmailClient};

/// Email client picked from settings at startup.
#[derive(Clone)]
pub enum ConfiguredEmailClient {
    Mock(MockEmailClient),
    Postmark(PostmarkEmailClient),
}

impl ConfiguredEmailClient {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Mock(_) => "mock",
            Self::Postmark(_) => "postmark",
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for ConfiguredEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        match self {
            Self::Mock(client) => client.send_email(recipient, subject, content).await,
            Self::Postmark(client) => client.send_email(recipient, subject, content).await,
        }
    }
}
