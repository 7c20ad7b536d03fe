//! Partner inquiry forwarding.

use std::sync::Arc;

use crate::domain::submission::{check_email, non_blank};
use crate::domain::RequiredFields;
use crate::error::GatewayError;
use crate::notify::{Mailer, PartnerInquiry};

/// Unvalidated partner inquiry fields as received.
#[derive(Debug, Clone, Default)]
pub struct InquiryDraft {
    /// Contact name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Message body.
    pub message: Option<String>,
}

/// Forwards partner inquiries to the partnerships inbox. Nothing is
/// persisted.
#[derive(Debug, Clone)]
pub struct PartnerService {
    mailer: Arc<Mailer>,
}

impl PartnerService {
    /// Creates a new `PartnerService`.
    #[must_use]
    pub fn new(mailer: Arc<Mailer>) -> Self {
        Self { mailer }
    }

    /// Fails unless the email API needed for inquiries is configured.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ServiceUnavailable`] if the email API is not
    /// configured.
    pub fn ensure_available(&self) -> Result<(), GatewayError> {
        if self.mailer.partner_inquiries_enabled() {
            return Ok(());
        }
        tracing::warn!("RESEND_API_KEY not set; partner inquiry rejected");
        Err(GatewayError::ServiceUnavailable(
            "Email service is not configured".to_string(),
        ))
    }

    /// Validates and forwards an inquiry.
    ///
    /// Configuration is checked before the fields, so an unconfigured
    /// deployment answers 503 to every inquiry.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::ServiceUnavailable`] if the email API is not configured.
    /// - [`GatewayError::InvalidRequest`] if name, email or message is missing.
    /// - [`GatewayError::Email`] if the email API rejects the message.
    pub async fn send_inquiry(&self, draft: InquiryDraft) -> Result<(), GatewayError> {
        self.ensure_available()?;

        let mut required = RequiredFields::default();
        let name = required.take("name", draft.name.as_deref());
        let email = required.take("email", draft.email.as_deref());
        let message = required.take("message", draft.message.as_deref());
        required.finish()?;
        check_email(&email)?;

        let inquiry = PartnerInquiry {
            name,
            email,
            company: non_blank(draft.company.as_deref()),
            message,
        };
        self.mailer.send_partner_inquiry(&inquiry).await?;
        Ok(())
    }
}
