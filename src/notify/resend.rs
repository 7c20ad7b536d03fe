//! Transactional email API client (Resend).

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use super::{EmailError, EmailTransport, OutgoingEmail};

/// Default send endpoint of the Resend API.
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Sends email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendTransport {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

/// Request body for `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl ResendTransport {
    /// Creates a client for the public API endpoint.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: RESEND_ENDPOINT.to_string(),
        }
    }
}

impl fmt::Debug for ResendTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendTransport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EmailTransport for ResendTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let body = SendEmailBody {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            text: email.text.as_deref(),
            reply_to: email.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Api(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let detail = response.text().await.unwrap_or_default();
        Err(EmailError::Api(format!("{status}: {detail}")))
    }
}
