//! SMTP delivery via `lettre`.

use std::fmt;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{EmailError, EmailTransport, OutgoingEmail};
use crate::config::SmtpConfig;

/// Port that selects implicit TLS instead of STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Authenticated SMTP relay.
pub struct SmtpTransport {
    host: String,
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Builds a relay client. Connections are opened on first send.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::Smtp`] if the TLS parameters for `host`
    /// cannot be built.
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let builder = if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| EmailError::Smtp(e.to_string()))?;

        let inner = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        Ok(Self {
            host: config.host.clone(),
            inner,
        })
    }
}

impl fmt::Debug for SmtpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpTransport")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EmailTransport for SmtpTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = build_message(email)?;
        self.inner
            .send(message)
            .await
            .map_err(|e| EmailError::Smtp(e.to_string()))?;
        Ok(())
    }
}

fn mailbox(raw: &str) -> Result<Mailbox, EmailError> {
    raw.parse()
        .map_err(|e| EmailError::Address(format!("{raw:?}: {e}")))
}

/// Renders an [`OutgoingEmail`] as a MIME message, multipart when a
/// plain-text alternative is present.
fn build_message(email: &OutgoingEmail) -> Result<Message, EmailError> {
    let mut builder = Message::builder()
        .from(mailbox(&email.from)?)
        .subject(email.subject.clone());
    for to in &email.to {
        builder = builder.to(mailbox(to)?);
    }
    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(mailbox(reply_to)?);
    }

    match &email.text {
        Some(text) => builder.multipart(MultiPart::alternative_plain_html(
            text.clone(),
            email.html.clone(),
        )),
        None => builder
            .header(ContentType::TEXT_HTML)
            .body(email.html.clone()),
    }
    .map_err(|e| EmailError::Build(e.to_string()))
}
