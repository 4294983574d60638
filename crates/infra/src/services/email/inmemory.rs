use super::{EmailSendResult, IEmailService};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Records every delivered email in an outbox. Recipients registered with
/// `fail_for` are rejected.
pub struct InMemoryEmailService {
    outbox: Mutex<Vec<SentEmail>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryEmailService {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(recipient.to_string());
    }

    pub fn outbox(&self) -> Vec<SentEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<SentEmail> {
        self.outbox()
            .into_iter()
            .filter(|email| email.to == recipient)
            .collect()
    }
}

impl Default for InMemoryEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailService for InMemoryEmailService {
    async fn send(&self, to: &str, subject: &str, html: &str) -> EmailSendResult {
        let failing = self
            .failing_recipients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|recipient| recipient == to);
        if failing {
            return EmailSendResult::failed(format!("Mailbox {} is unavailable", to));
        }
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                html: html.to_string(),
            });
        EmailSendResult::sent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_and_fails_per_recipient() {
        let email = InMemoryEmailService::new();
        email.fail_for("broken@example.com");

        let res = email.send("ana@example.com", "Hello", "<p>Hi</p>").await;
        assert_eq!(res, EmailSendResult::sent());
        let res = email.send("broken@example.com", "Hello", "<p>Hi</p>").await;
        assert!(!res.success);
        assert!(res.error.is_some());

        assert_eq!(email.outbox().len(), 1);
        assert_eq!(email.sent_to("ana@example.com")[0].subject, "Hello");
        assert!(email.sent_to("broken@example.com").is_empty());
    }
}
