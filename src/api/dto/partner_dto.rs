//! Partner inquiry DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::service::InquiryDraft;

/// Request body for `POST /api/partner-inquiry`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PartnerInquiryRequest {
    /// Contact name. Required.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email. Required.
    #[serde(default)]
    pub email: Option<String>,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Message. Required.
    #[serde(default)]
    pub message: Option<String>,
}

impl From<PartnerInquiryRequest> for InquiryDraft {
    fn from(req: PartnerInquiryRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            company: req.company,
            message: req.message,
        }
    }
}
