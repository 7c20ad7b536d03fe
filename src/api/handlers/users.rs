//! Admin dashboard endpoints: list, export, edit, delete.
//!
//! Every route here requires an [`AdminSession`]. Delete is additionally
//! gated by `DELETE_USER_ENABLED`, which is checked before the session so
//! a disabled deployment answers 403 to everyone.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::Utc;

use crate::api::dto::{
    AdminConfigResponse, DeleteUserRequest, ListUsersQuery, MessageResponse, UpdateUserRequest,
    UpdateUserResponse, UserDto, UserListResponse,
};
use crate::api::session::AdminSession;
use crate::app_state::AppState;
use crate::domain::submission::non_blank;
use crate::domain::{Page, RegistrationId, TShirtSize};
use crate::error::{ErrorResponse, GatewayError};
use crate::service::export::{export_filename, registrations_csv};

/// `GET /users` — List registrations with filters and pagination.
///
/// # Errors
///
/// Returns [`GatewayError`] when unauthenticated (401), on a malformed
/// date (400), or on store failure (500/503).
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    summary = "List registrations",
    description = "Returns registrations newest first. Text filters match case-insensitive substrings; gender and race category match exactly; the date range is inclusive.",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Paginated registrations", body = UserListResponse),
        (status = 400, description = "Malformed filter", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
    )
)]
pub async fn list_users(
    _session: AdminSession,
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListUsersQuery>, GatewayError>,
) -> Result<impl IntoResponse, GatewayError> {
    let (filter, page) = query.to_criteria()?;
    let listing = state.registrations.list(&filter, page).await?;

    let users: Vec<UserDto> = listing.records.into_iter().map(UserDto::from).collect();
    Ok(Json(UserListResponse {
        count: users.len(),
        users,
        total: listing.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages(listing.total),
    }))
}

/// `GET /users/export` — Download the filtered listing as CSV.
///
/// Pagination parameters are ignored; up to [`Page::MAX_LIMIT`] records
/// are exported.
///
/// # Errors
///
/// Returns [`GatewayError`] when unauthenticated (401), on a malformed
/// date (400), or on store failure (500/503).
#[utoipa::path(
    get,
    path = "/api/users/export",
    tag = "Users",
    summary = "Export registrations as CSV",
    description = "Applies the listing filters and returns every match as a CSV attachment.",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 401, description = "Not logged in", body = ErrorResponse),
    )
)]
pub async fn export_users(
    _session: AdminSession,
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListUsersQuery>, GatewayError>,
) -> Result<impl IntoResponse, GatewayError> {
    let (filter, _) = query.to_criteria()?;
    let listing = state
        .registrations
        .list(&filter, Page::new(1, Page::MAX_LIMIT))
        .await?;
    if listing.total > u64::from(Page::MAX_LIMIT) {
        tracing::warn!(total = listing.total, "export truncated to the page cap");
    }

    let body = registrations_csv(&listing.records)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(Utc::now().date_naive())
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// `GET /users/config` — Dashboard feature flags.
#[utoipa::path(
    get,
    path = "/api/users/config",
    tag = "Users",
    summary = "Dashboard configuration",
    responses(
        (status = 200, description = "Feature flags", body = AdminConfigResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
    )
)]
pub async fn admin_config(
    _session: AdminSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    Json(AdminConfigResponse {
        delete_user_enabled: state.config.delete_user_enabled,
    })
}

/// `PATCH /users/{id}` — Set or clear a t-shirt size.
///
/// # Errors
///
/// Returns [`GatewayError`] when unauthenticated (401), on an invalid size
/// or id (400), when the record does not exist (404), or on store failure.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    summary = "Update t-shirt size",
    params(("id" = String, Path, description = "Registration id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Size updated", body = UpdateUserResponse),
        (status = 400, description = "Invalid size or id", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn update_user(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateUserRequest>, GatewayError>,
) -> Result<impl IntoResponse, GatewayError> {
    let size = TShirtSize::parse_optional(req.t_shirt_size.as_deref().unwrap_or_default())?;
    let id: RegistrationId = id.parse()?;

    let updated = state.registrations.update_tshirt_size(id, size).await?;
    Ok(Json(UpdateUserResponse {
        success: true,
        t_shirt_size: updated
            .details
            .tshirt_size
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
    }))
}

/// `DELETE /users/delete` — Delete one registration.
///
/// The body is parsed only after the feature flag and the session are
/// checked.
///
/// # Errors
///
/// Returns [`GatewayError`] when deletion is disabled (403), when
/// unauthenticated (401), on a missing or invalid id (400), when the
/// record does not exist (404), or on store failure.
#[utoipa::path(
    delete,
    path = "/api/users/delete",
    tag = "Users",
    summary = "Delete a registration",
    description = "Disabled unless DELETE_USER_ENABLED=true.",
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Missing or invalid user id", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Deletion disabled", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<impl IntoResponse, GatewayError> {
    if !state.config.delete_user_enabled {
        return Err(GatewayError::Forbidden(
            "Delete user is disabled".to_string(),
        ));
    }
    AdminSession::from_jar(&jar)?;

    let req: DeleteUserRequest = serde_json::from_slice(&body)
        .map_err(|err| GatewayError::InvalidRequest(format!("Invalid JSON body: {err}")))?;
    let Some(raw_id) = non_blank(req.user_id.as_deref()) else {
        return Err(GatewayError::InvalidRequest("User ID is required".to_string()));
    };
    let id: RegistrationId = raw_id.parse()?;

    state.registrations.delete(id).await?;
    Ok(Json(MessageResponse::ok("User deleted")))
}

/// Admin user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/export", get(export_users))
        .route("/users/config", get(admin_config))
        .route("/users/delete", delete(delete_user))
        .route("/users/{id}", patch(update_user))
}
