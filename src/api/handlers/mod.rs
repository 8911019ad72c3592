//! REST endpoint handlers organized by resource.

pub mod boards;
pub mod claims;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(claims::routes())
        .merge(boards::routes())
        .merge(users::routes())
}
