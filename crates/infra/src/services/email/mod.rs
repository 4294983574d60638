mod disabled;
mod http;
mod inmemory;

pub use disabled::DisabledEmailService;
pub use http::HttpEmailService;
pub use inmemory::{InMemoryEmailService, SentEmail};

/// Outcome of a single delivery attempt. Delivery failures are reported
/// here instead of as errors so that callers can treat email as best effort.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailSendResult {
    pub success: bool,
    pub error: Option<String>,
}

impl EmailSendResult {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[async_trait::async_trait]
pub trait IEmailService: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> EmailSendResult;
}
