//! System endpoints: health check and the registration form catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::{RaceCategory, TEAM_SIZE, TShirtSize};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// One selectable race category.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RaceCategoryInfo {
    name: &'static str,
    team: bool,
    members: usize,
}

/// Options offered by the registration form.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOptions {
    race_categories: Vec<RaceCategoryInfo>,
    t_shirt_sizes: Vec<&'static str>,
}

/// `GET /config/registration-options` — Race categories and t-shirt sizes.
#[utoipa::path(
    get,
    path = "/config/registration-options",
    tag = "System",
    summary = "Registration form options",
    description = "Lists the accepted race categories (with team size) and t-shirt sizes.",
    responses(
        (status = 200, description = "Form options", body = RegistrationOptions),
    )
)]
pub async fn registration_options_handler() -> impl IntoResponse {
    let race_categories = RaceCategory::ALL
        .into_iter()
        .map(|category| RaceCategoryInfo {
            name: category.as_str(),
            team: category.is_team(),
            members: if category.is_team() { TEAM_SIZE } else { 1 },
        })
        .collect();
    let t_shirt_sizes = TShirtSize::ALL.into_iter().map(TShirtSize::as_str).collect();
    (
        StatusCode::OK,
        Json(RegistrationOptions {
            race_categories,
            t_shirt_sizes,
        }),
    )
}

/// System routes mounted at the root level (not under /api).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/config/registration-options",
            get(registration_options_handler),
        )
}
