//! Outbound email: registrant confirmations, operations notifications,
//! and partner inquiries.
//!
//! Delivery goes through the [`EmailTransport`] trait. The confirmation
//! email uses SMTP ([`smtp::SmtpTransport`]); the operations notification
//! and partner inquiries use the transactional email API
//! ([`resend::ResendTransport`]). [`Mailer`] decides which transport to
//! use and treats registration emails as best-effort: failures are
//! logged and reported, never returned as errors.

pub mod memory;
pub mod resend;
pub mod smtp;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::domain::{RaceCategory, Registration, TShirtSize, TeamId};

pub use memory::MemoryTransport;
pub use resend::ResendTransport;
pub use smtp::SmtpTransport;

/// A fully rendered email ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender, mailbox syntax (`Name <addr>` or bare address).
    pub from: String,
    /// Recipients.
    pub to: Vec<String>,
    /// Optional reply-to address.
    pub reply_to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative.
    pub text: Option<String>,
}

/// Email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The transport needed for this email is not configured.
    #[error("email service is not configured: {0}")]
    NotConfigured(&'static str),

    /// A sender or recipient address could not be parsed.
    #[error("invalid email address {0}")]
    Address(String),

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The SMTP relay rejected or failed the delivery.
    #[error("smtp delivery failed: {0}")]
    Smtp(String),

    /// The email API returned an error.
    #[error("email api request failed: {0}")]
    Api(String),
}

/// Something that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait EmailTransport: Send + Sync + std::fmt::Debug {
    /// Sends one email.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] when the message cannot be built or
    /// delivered.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}

/// Outcome of one best-effort email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the transport successfully.
    Sent,
    /// Not attempted because the transport or recipient is not configured.
    Skipped,
    /// Attempted and failed; the failure was logged.
    Failed,
}

/// Outcome of the two registration emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// Confirmation to the registrant.
    pub confirmation: Delivery,
    /// Notification to operations staff.
    pub notification: Delivery,
}

/// What the registration emails need to know about a stored submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationNotice {
    /// Registrant name; the first member for teams.
    pub name: String,
    /// Registrant or team contact email.
    pub email: String,
    /// Race category.
    pub race_category: RaceCategory,
    /// Club or team name.
    pub affiliations: String,
    /// Team id for team registrations.
    pub team_id: Option<TeamId>,
    /// Every registered person with their t-shirt size, in member order.
    pub members: Vec<(String, Option<TShirtSize>)>,
}

impl RegistrationNotice {
    /// Builds the notice from the records of one submission.
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn from_records(records: &[Registration]) -> Option<Self> {
        let first = records.first()?;
        Some(Self {
            name: first.details.name.clone(),
            email: first.details.email.clone(),
            race_category: first.details.race_category,
            affiliations: first.details.affiliations.clone(),
            team_id: first.details.team_id,
            members: records
                .iter()
                .map(|r| (r.details.name.clone(), r.details.tshirt_size))
                .collect(),
        })
    }

    /// T-shirt line for the confirmation: the size for individuals,
    /// `Team T-shirt sizes: M, L, XL, S` for teams.
    #[must_use]
    pub fn tshirt_summary(&self) -> String {
        let sizes: Vec<&str> = self
            .members
            .iter()
            .map(|(_, size)| size.map_or("-", TShirtSize::as_str))
            .collect();
        if self.team_id.is_some() {
            format!("Team T-shirt sizes: {}", sizes.join(", "))
        } else {
            sizes.join(", ")
        }
    }
}

/// A partner inquiry from the marketing site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerInquiry {
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Company, if given.
    pub company: Option<String>,
    /// Free-text message.
    pub message: String,
}

/// Addresses and links used when rendering email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerSettings {
    /// Sender of the registrant confirmation.
    pub confirmation_from: String,
    /// Sender of the operations notification.
    pub notify_from: String,
    /// Operations recipient; notifications are skipped when unset.
    pub notify_to: Option<String>,
    /// Recipient of partner inquiries.
    pub partner_to: String,
    /// Sender of partner inquiries.
    pub partner_from: String,
    /// Public site URL for payment QR images.
    pub public_app_url: Option<String>,
}

impl From<&AppConfig> for MailerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            confirmation_from: config
                .smtp
                .as_ref()
                .map_or_else(|| crate::config::DEFAULT_SMTP_FROM.to_string(), |s| s.from.clone()),
            notify_from: config.notify_from.clone(),
            notify_to: config.notify_to.clone(),
            partner_to: config.partner_inquiry_to.clone(),
            partner_from: config.partner_inquiry_from.clone(),
            public_app_url: config.public_app_url.clone(),
        }
    }
}

/// Routes each kind of email to its transport.
#[derive(Debug, Clone)]
pub struct Mailer {
    settings: MailerSettings,
    smtp: Option<Arc<dyn EmailTransport>>,
    api: Option<Arc<dyn EmailTransport>>,
}

impl Mailer {
    /// Creates a mailer over explicit transports. `None` means the
    /// transport is not configured.
    #[must_use]
    pub fn new(
        settings: MailerSettings,
        smtp: Option<Arc<dyn EmailTransport>>,
        api: Option<Arc<dyn EmailTransport>>,
    ) -> Self {
        Self {
            settings,
            smtp,
            api,
        }
    }

    /// Builds transports from configuration. A relay that cannot be set
    /// up is logged and treated as unconfigured.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let smtp = config
            .smtp
            .as_ref()
            .and_then(|smtp| match SmtpTransport::new(smtp) {
                Ok(transport) => Some(Arc::new(transport) as Arc<dyn EmailTransport>),
                Err(err) => {
                    tracing::error!(error = %err, host = %smtp.host, "invalid SMTP settings");
                    None
                }
            });
        let api = config
            .resend_api_key
            .as_ref()
            .map(|key| Arc::new(ResendTransport::new(key.clone())) as Arc<dyn EmailTransport>);
        Self::new(MailerSettings::from(config), smtp, api)
    }

    /// Sends the registrant confirmation and the operations notification
    /// concurrently. Neither failure affects the other or the caller.
    pub async fn send_registration_emails(&self, notice: &RegistrationNotice) -> DispatchReport {
        let (confirmation, notification) = tokio::join!(
            self.send_confirmation(notice),
            self.send_operations_notice(notice)
        );
        DispatchReport {
            confirmation,
            notification,
        }
    }

    async fn send_confirmation(&self, notice: &RegistrationNotice) -> Delivery {
        let Some(transport) = &self.smtp else {
            tracing::warn!(
                "SMTP not configured (SMTP_HOST, SMTP_PORT, SMTP_USER, SMTP_PASS); \
                 skipping confirmation email"
            );
            return Delivery::Skipped;
        };
        match templates::confirmation(&self.settings, notice) {
            Ok(email) => deliver(transport.as_ref(), &email, "confirmation").await,
            Err(err) => {
                tracing::error!(kind = "confirmation", error = %err, "email rendering failed");
                Delivery::Failed
            }
        }
    }

    async fn send_operations_notice(&self, notice: &RegistrationNotice) -> Delivery {
        let (Some(transport), Some(to)) = (&self.api, &self.settings.notify_to) else {
            tracing::warn!(
                "RESEND_API_KEY or NOTIFY_EMAIL_TO not set; skipping operations notification"
            );
            return Delivery::Skipped;
        };
        match templates::operations_notice(&self.settings.notify_from, to, notice) {
            Ok(email) => deliver(transport.as_ref(), &email, "notification").await,
            Err(err) => {
                tracing::error!(kind = "notification", error = %err, "email rendering failed");
                Delivery::Failed
            }
        }
    }

    /// Forwards a partner inquiry through the email API.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::NotConfigured`] when no API key is set,
    /// [`EmailError::Build`] when the body fails to render, or the
    /// transport error when delivery fails.
    pub async fn send_partner_inquiry(&self, inquiry: &PartnerInquiry) -> Result<(), EmailError> {
        let Some(transport) = &self.api else {
            return Err(EmailError::NotConfigured("RESEND_API_KEY"));
        };
        let email = templates::partner_inquiry(&self.settings, inquiry)?;
        transport.send(&email).await?;
        tracing::info!(from = %inquiry.email, "partner inquiry forwarded");
        Ok(())
    }

    /// Returns `true` when partner inquiries can be delivered.
    #[must_use]
    pub fn partner_inquiries_enabled(&self) -> bool {
        self.api.is_some()
    }
}

async fn deliver(
    transport: &dyn EmailTransport,
    email: &OutgoingEmail,
    kind: &'static str,
) -> Delivery {
    match transport.send(email).await {
        Ok(()) => {
            tracing::info!(kind, to = %email.to.join(", "), "email sent");
            Delivery::Sent
        }
        Err(err) => {
            tracing::error!(kind, error = %err, "email delivery failed");
            Delivery::Failed
        }
    }
}
