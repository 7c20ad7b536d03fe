//! Admin session cookie and the extractor that guards admin routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::error::GatewayError;

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Value stored in the cookie after a successful login.
pub const SESSION_VALUE: &str = "authenticated";

/// Lifetime of the session cookie.
pub const SESSION_MAX_AGE: time::Duration = time::Duration::days(7);

/// Proof that the request carries a valid admin session.
///
/// Use it as a handler argument to require a login; the request is
/// rejected with 401 before the handler runs otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl AdminSession {
    /// Checks the session cookie in `jar`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] when the cookie is missing
    /// or holds any other value.
    pub fn from_jar(jar: &CookieJar) -> Result<Self, GatewayError> {
        match jar.get(SESSION_COOKIE) {
            Some(cookie) if cookie.value() == SESSION_VALUE => Ok(Self),
            _ => Err(GatewayError::Unauthorized),
        }
    }
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Self::from_jar(&jar)
    }
}

/// Builds the cookie set on login.
#[must_use]
pub fn session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, SESSION_VALUE))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(SESSION_MAX_AGE)
        .secure(secure)
        .build()
}

/// Builds the cookie that removes the session on logout.
#[must_use]
pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .secure(secure)
        .build()
}
