//! Admin login and logout.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::{CookieJar, WithRejection};

use crate::api::dto::{LoginRequest, MessageResponse};
use crate::api::session::{expired_session_cookie, session_cookie};
use crate::app_state::AppState;
use crate::domain::submission::non_blank;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /auth/login` — Start an admin session.
///
/// # Errors
///
/// Returns [`GatewayError::Misconfigured`] when admin credentials are not
/// configured and [`GatewayError::Unauthorized`] on a mismatch.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    summary = "Admin login",
    description = "Compares the trimmed credentials with ADMIN_EMAIL / ADMIN_PASSWORD and sets the httpOnly `admin_session` cookie for 7 days.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Admin credentials not configured", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, GatewayError>,
) -> Result<impl IntoResponse, GatewayError> {
    let admin = &state.config.admin;
    let (Some(expected_email), Some(expected_password)) = (&admin.email, &admin.password) else {
        return Err(GatewayError::Misconfigured(
            "ADMIN_EMAIL or ADMIN_PASSWORD not set".to_string(),
        ));
    };

    let email = non_blank(req.email.as_deref()).unwrap_or_default();
    let password = non_blank(req.password.as_deref()).unwrap_or_default();
    if email != *expected_email || password != *expected_password {
        tracing::warn!(email = %email, "admin login failed");
        return Err(GatewayError::Unauthorized);
    }

    tracing::info!(email = %email, "admin logged in");
    let jar = jar.add(session_cookie(state.config.cookie_secure));
    Ok((jar, Json(MessageResponse::ok("Logged in"))))
}

/// `POST /auth/logout` — End the admin session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    summary = "Admin logout",
    description = "Expires the `admin_session` cookie.",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
    )
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(expired_session_cookie(state.config.cookie_secure));
    (jar, Json(MessageResponse::ok("Logged out")))
}

/// Auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}
