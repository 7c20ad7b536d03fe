//! Partner inquiry forwarding.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{MessageResponse, PartnerInquiryRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /partner-inquiry` — Forward a partnership inquiry by email.
///
/// # Errors
///
/// Returns [`GatewayError`] when the email API is not configured (503),
/// the body is not JSON or a required field is missing (400), or delivery
/// fails (500). Configuration is checked before the body is read.
#[utoipa::path(
    post,
    path = "/api/partner-inquiry",
    tag = "Partners",
    summary = "Send a partner inquiry",
    description = "Emails the inquiry to the partnerships inbox with the sender as reply-to. Nothing is stored.",
    request_body = PartnerInquiryRequest,
    responses(
        (status = 200, description = "Inquiry sent", body = MessageResponse),
        (status = 400, description = "Malformed body or missing field", body = ErrorResponse),
        (status = 503, description = "Email service not configured", body = ErrorResponse),
    )
)]
pub async fn partner_inquiry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    state.partners.ensure_available()?;

    let req: PartnerInquiryRequest = serde_json::from_slice(&body)
        .map_err(|err| GatewayError::InvalidRequest(format!("Invalid JSON body: {err}")))?;
    state.partners.send_inquiry(req.into()).await?;
    Ok(Json(MessageResponse::ok("Inquiry sent")))
}

/// Partner routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/partner-inquiry", post(partner_inquiry))
}
