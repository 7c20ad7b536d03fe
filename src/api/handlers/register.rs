//! Public registration intake.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::api::dto::{RegisterRequest, RegisterResponse};
use crate::app_state::AppState;
use crate::domain::Submission;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /register` — Register an individual or a team of four.
///
/// # Errors
///
/// Returns [`GatewayError`] on validation failure (400), a duplicate
/// email (409), or store failure (500/503). Email delivery problems are
/// logged and never fail the request.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Registration",
    summary = "Register for the race",
    description = "Validates the submission, rejects already registered emails, stores one record (or four for `Team Category`) and sends the confirmation and operations emails on a best-effort basis.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration stored", body = RegisterResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 503, description = "Store not configured", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, GatewayError>,
) -> Result<impl IntoResponse, GatewayError> {
    let submission = Submission::try_from(req)?;
    let is_team = matches!(submission, Submission::Team(_));

    let outcome = state.registrations.register(submission).await?;

    let message = if is_team {
        "Team registration successful"
    } else {
        "Registration successful"
    };
    let response = RegisterResponse {
        success: true,
        message: message.to_string(),
        id: outcome.id,
        team_id: outcome.team_id,
        team_ids: outcome.team_ids,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Registration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}
