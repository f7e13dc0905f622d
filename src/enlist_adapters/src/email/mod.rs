pub mod configured_email_client;
pub mod mock_email_client;
pub mod postmark_email_client;
pub mod verification_notifier;

pub use configured_email_client::ConfiguredEmailClient;
pub use mock_email_client::{MockEmailClient, SentEmail};
pub use postmark_email_client::PostmarkEmailClient;
pub use verification_notifier::EmailVerificationNotifier;
