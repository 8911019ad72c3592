//! Per-user handlers: stats, longest streak, total juice.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{UserJuiceResponse, UserStreakResponse};
use crate::app_state::AppState;
use crate::domain::{UserId, UserStats};
use crate::error::{BoardError, ErrorResponse};

/// `GET /users/:user_id/stats` — Score, juice and longest streak.
///
/// # Errors
///
/// Returns [`BoardError::UserNotFound`] if the member never claimed a first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/stats",
    tag = "Users",
    summary = "Member stats",
    description = "Number of firsts, total juice and longest streak for one member.",
    params(
        ("user_id" = String, Path, description = "Platform user id"),
    ),
    responses(
        (status = 200, description = "Member stats", body = UserStats),
        (status = 404, description = "Member never claimed a first", body = ErrorResponse),
    )
)]
pub async fn user_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, BoardError> {
    let user_id = UserId::parse(&user_id)?;
    Ok(Json(state.claim_service.user_stats(&user_id).await?))
}

/// `GET /users/:user_id/streak` — Longest streak of one member.
///
/// # Errors
///
/// Returns [`BoardError::UserNotFound`] if the member never claimed a first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/streak",
    tag = "Users",
    summary = "Member longest streak",
    description = "Longest run of consecutive firsts owned by the member.",
    params(
        ("user_id" = String, Path, description = "Platform user id"),
    ),
    responses(
        (status = 200, description = "Longest streak", body = UserStreakResponse),
        (status = 404, description = "Member never claimed a first", body = ErrorResponse),
    )
)]
pub async fn user_streak(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, BoardError> {
    let user_id = UserId::parse(&user_id)?;
    let longest_streak = state.claim_service.longest_streak_for_user(&user_id).await?;
    Ok(Json(UserStreakResponse {
        user_id,
        longest_streak,
    }))
}

/// `GET /users/:user_id/juice` — Total juice of one member.
///
/// # Errors
///
/// Returns [`BoardError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/juice",
    tag = "Users",
    summary = "Member juice",
    description = "Total juice of the member in minutes; zero if they never claimed.",
    params(
        ("user_id" = String, Path, description = "Platform user id"),
    ),
    responses(
        (status = 200, description = "Total juice", body = UserJuiceResponse),
    )
)]
pub async fn user_juice(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, BoardError> {
    let user_id = UserId::parse(&user_id)?;
    let juice = state.claim_service.user_total_juice(&user_id).await?;
    Ok(Json(UserJuiceResponse { user_id, juice }))
}

/// Per-user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/stats", get(user_stats))
        .route("/users/{user_id}/streak", get(user_streak))
        .route("/users/{user_id}/juice", get(user_juice))
}
