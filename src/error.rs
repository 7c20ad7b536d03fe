//! Service error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the HTTP layer. Each
//! variant maps to a specific HTTP status code and a JSON error body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::notify::EmailError;
use crate::persistence::StoreError;

/// JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Email already registered", "code": 2002 }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                   |
/// |-----------|-----------------|-------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request               |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict  |
/// | 3000–3999 | Server          | 500 / 503                     |
/// | 5000–5999 | Access          | 401 Unauthorized / 403        |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("{0}")]
    InvalidRequest(String),

    /// A path or body identifier is not a valid registration id.
    #[error("invalid user ID format: {0}")]
    InvalidId(String),

    /// Registration with the given id was not found.
    #[error("user not found")]
    NotFound,

    /// The submitted email is already registered.
    #[error("Email already registered")]
    EmailTaken,

    /// Missing or invalid admin session.
    #[error("Unauthorized")]
    Unauthorized,

    /// The requested operation is switched off.
    #[error("{0}")]
    Forbidden(String),

    /// An external dependency required by the request is not configured.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// A required server setting is missing.
    #[error("server configuration error: {0}")]
    Misconfigured(String),

    /// Registration store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Outbound email failure on a request whose result depends on it.
    #[error(transparent)]
    Email(#[from] EmailError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidId(_) => 1002,
            Self::NotFound => 2001,
            Self::EmailTaken => 2002,
            Self::Internal(_) => 3000,
            Self::Store(_) => 3001,
            Self::ServiceUnavailable(_) => 3002,
            Self::Email(_) => 3003,
            Self::Misconfigured(_) => 3004,
            Self::Unauthorized => 5001,
            Self::Forbidden(_) => 5003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::ServiceUnavailable(_)
            | Self::Store(StoreError::Unavailable(_))
            | Self::Email(EmailError::NotConfigured(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(StoreError::Backend(_))
            | Self::Email(_)
            | Self::Misconfigured(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients. Server-side failure details stay in
    /// the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Store(StoreError::Unavailable(_)) => {
                "Registration service is temporarily unavailable".to_string()
            }
            Self::Store(_) | Self::Internal(_) => "Failed to process request".to_string(),
            Self::Email(EmailError::NotConfigured(_)) => {
                "Email service is not configured".to_string()
            }
            Self::Email(_) => "Failed to send email".to_string(),
            Self::Misconfigured(_) => {
                "Server configuration error. Please contact administrator.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: self.public_message(),
            code: self.error_code(),
        };
        (status, axum::Json(body)).into_response()
    }
}
