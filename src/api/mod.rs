//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api`; `/health` and the form
//! catalog live at the root.

pub mod dto;
pub mod handlers;
pub mod session;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "race-registration", description = "Speed Series registration and admin API"),
    paths(
        handlers::register::register,
        handlers::users::list_users,
        handlers::users::export_users,
        handlers::users::admin_config,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::partner::partner_inquiry,
        handlers::system::health_handler,
        handlers::system::registration_options_handler,
    ),
    tags(
        (name = "Registration", description = "Public race registration"),
        (name = "Users", description = "Admin dashboard, requires the admin session cookie"),
        (name = "Auth", description = "Admin session"),
        (name = "Partners", description = "Partnership inquiries"),
        (name = "System", description = "Health and form options"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the served application: routes, Swagger UI when enabled,
/// request tracing and CORS, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
