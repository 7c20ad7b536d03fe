//! Admin login DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for `POST /api/auth/login`.
#[derive(Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Admin email.
    #[serde(default)]
    pub email: Option<String>,
    /// Admin password.
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
