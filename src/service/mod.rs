//! Service layer: business logic orchestration.
//!
//! [`RegistrationService`] coordinates the registration store and the
//! best-effort registration emails. [`PartnerService`] forwards partner
//! inquiries. [`export`] renders listings as CSV for the dashboard.

pub mod export;
pub mod partner_service;
pub mod registration_service;

pub use partner_service::{InquiryDraft, PartnerService};
pub use registration_service::{RegistrationOutcome, RegistrationService};
