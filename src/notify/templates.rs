//! Email bodies, rendered with askama from `templates/email/`.
//! HTML templates escape every interpolated value.

use askama::Template;

use super::{EmailError, MailerSettings, OutgoingEmail, PartnerInquiry, RegistrationNotice};

/// Where registrants send proof of payment.
pub const PAYMENT_PROOF_ADDRESS: &str = "1@oneofakindasia.com";

/// Subject of the registrant confirmation.
pub const CONFIRMATION_SUBJECT: &str = "Speed Series Registration Received – Pending Payment";

#[derive(Template)]
#[template(path = "email/confirmation.html")]
struct ConfirmationHtml<'a> {
    notice: &'a RegistrationNotice,
    settings: &'a MailerSettings,
    members: Vec<&'a str>,
    sizes: &'a str,
    proof_address: &'a str,
}

#[derive(Template)]
#[template(path = "email/confirmation.txt")]
struct ConfirmationText<'a> {
    notice: &'a RegistrationNotice,
    settings: &'a MailerSettings,
    sizes: &'a str,
    proof_address: &'a str,
}

#[derive(Template)]
#[template(path = "email/operations_notice.html")]
struct OperationsNoticeHtml<'a> {
    notice: &'a RegistrationNotice,
    sizes: &'a str,
    members: String,
}

#[derive(Template)]
#[template(path = "email/partner_inquiry.html")]
struct PartnerInquiryHtml<'a> {
    inquiry: &'a PartnerInquiry,
    lines: Vec<&'a str>,
}

fn render(template: &impl Template) -> Result<String, EmailError> {
    template
        .render()
        .map_err(|err| EmailError::Build(format!("template: {err}")))
}

fn member_names(notice: &RegistrationNotice) -> Vec<&str> {
    notice.members.iter().map(|(name, _)| name.as_str()).collect()
}

/// "Registration received, pending payment" email to the registrant.
///
/// # Errors
///
/// Returns [`EmailError::Build`] when a template fails to render.
pub fn confirmation(
    settings: &MailerSettings,
    notice: &RegistrationNotice,
) -> Result<OutgoingEmail, EmailError> {
    let sizes = notice.tshirt_summary();
    let html = render(&ConfirmationHtml {
        notice,
        settings,
        members: member_names(notice),
        sizes: &sizes,
        proof_address: PAYMENT_PROOF_ADDRESS,
    })?;
    let text = render(&ConfirmationText {
        notice,
        settings,
        sizes: &sizes,
        proof_address: PAYMENT_PROOF_ADDRESS,
    })?;

    Ok(OutgoingEmail {
        from: settings.confirmation_from.clone(),
        to: vec![notice.email.clone()],
        reply_to: None,
        subject: CONFIRMATION_SUBJECT.to_string(),
        html,
        text: Some(text),
    })
}

/// Internal notice to operations staff about a new registration.
///
/// # Errors
///
/// Returns [`EmailError::Build`] when the template fails to render.
pub fn operations_notice(
    from: &str,
    to: &str,
    notice: &RegistrationNotice,
) -> Result<OutgoingEmail, EmailError> {
    let sizes = notice.tshirt_summary();
    let html = render(&OperationsNoticeHtml {
        notice,
        sizes: &sizes,
        members: member_names(notice).join(", "),
    })?;

    Ok(OutgoingEmail {
        from: from.to_string(),
        to: vec![to.to_string()],
        reply_to: Some(notice.email.clone()),
        subject: format!("New registration: {} ({})", notice.name, notice.race_category),
        html,
        text: None,
    })
}

/// Partner inquiry forwarded to the partnerships inbox.
///
/// # Errors
///
/// Returns [`EmailError::Build`] when the template fails to render.
pub fn partner_inquiry(
    settings: &MailerSettings,
    inquiry: &PartnerInquiry,
) -> Result<OutgoingEmail, EmailError> {
    let html = render(&PartnerInquiryHtml {
        inquiry,
        lines: inquiry.message.lines().collect(),
    })?;
    let company_suffix = inquiry
        .company
        .as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default();

    Ok(OutgoingEmail {
        from: settings.partner_from.clone(),
        to: vec![settings.partner_to.clone()],
        reply_to: Some(inquiry.email.clone()),
        subject: format!("Partner inquiry from {}{company_suffix}", inquiry.name),
        html,
        text: None,
    })
}
