//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement returned by endpoints with nothing else to report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Always `true`; failures use the error body instead.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Builds a successful acknowledgement.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
