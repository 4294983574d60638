use super::{EmailSendResult, IEmailService};
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

/// Delivers emails through a transactional email HTTP api that accepts
/// a json body with `from`, `to`, `subject` and `html` and bearer auth.
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait::async_trait]
impl IEmailService for HttpEmailService {
    async fn send(&self, to: &str, subject: &str, html: &str) -> EmailSendResult {
        let body = SendEmailRequest {
            from: &self.from,
            to: vec![to],
            subject,
            html,
        };
        let res = match self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                warn!("Unable to reach the email api: {:?}", e);
                return EmailSendResult::failed(e.to_string());
            }
        };

        let status = res.status();
        if status.is_success() {
            return EmailSendResult::sent();
        }
        let reason = res.text().await.unwrap_or_default();
        warn!(
            "The email api rejected the email to {} with status {}: {}",
            to, status, reason
        );
        EmailSendResult::failed(format!("Email api responded with {}: {}", status, reason))
    }
}
