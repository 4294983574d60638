use super::{EmailSendResult, IEmailService};
use tracing::debug;

/// Used when no email provider is configured
pub struct DisabledEmailService {}

#[async_trait::async_trait]
impl IEmailService for DisabledEmailService {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> EmailSendResult {
        debug!("Email delivery is disabled, dropping \"{}\" to {}", subject, to);
        EmailSendResult::failed("Email delivery is not configured")
    }
}
