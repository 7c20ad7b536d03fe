//! REST endpoint handlers organized by resource.

pub mod auth;
pub mod partner;
pub mod register;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(register::routes())
        .merge(users::routes())
        .merge(auth::routes())
        .merge(partner::routes())
}
