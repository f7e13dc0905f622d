use std::time::Duration;

use enlist_core::{DisplayName, Email, EmailClient, VerificationNotifier, VerificationToken};

pub const VERIFICATION_EMAIL_SUBJECT: &str = "Confirm your email address";
pub const VERIFICATION_PATH: &str = "/verify-email";

/// Sends the confirmation link through an [`EmailClient`].
#[derive(Clone)]
pub struct EmailVerificationNotifier<E> {
    email_client: E,
    base_url: String,
    link_validity: Duration,
}

impl<E> EmailVerificationNotifier<E> {
    pub fn new(email_client: E, base_url: impl Into<String>, link_validity: Duration) -> Self {
        Self {
            email_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            link_validity,
        }
    }

    pub fn email_client(&self) -> &E {
        &self.email_client
    }

    pub fn verification_url(&self, token: &VerificationToken) -> String {
        format!("{}{VERIFICATION_PATH}?token={token}", self.base_url)
    }

    fn render(&self, display_name: &DisplayName, url: &str) -> String {
        let validity = describe_validity(self.link_validity);
        format!(
            "Hello {display_name},\n\n\
             Thanks for signing up. Open the link below to confirm your email address.\n\n\
             {url}\n\n\
             This link is valid for {validity}.\n\
             This message was sent automatically, please do not reply.\n"
        )
    }
}

#[async_trait::async_trait]
impl<E: EmailClient> VerificationNotifier for EmailVerificationNotifier<E> {
    #[tracing::instrument(name = "Delivering verification link", skip_all)]
    async fn deliver_verification_link(
        &self,
        email: &Email,
        display_name: &DisplayName,
        token: &VerificationToken,
    ) -> Result<(), String> {
        let url = self.verification_url(token);
        let content = self.render(display_name, &url);

        self.email_client
            .send_email(email, VERIFICATION_EMAIL_SUBJECT, &content)
            .await
    }
}

/// Rounds up, so the mail never promises more time than the link has.
fn describe_validity(validity: Duration) -> String {
    let secs = validity.as_secs().max(1);
    let (amount, unit) = if secs >= 3600 {
        (secs.div_ceil(3600), "hour")
    } else {
        (secs.div_ceil(60), "minute")
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural}")
}
