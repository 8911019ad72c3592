//! Reporting handlers: streak, score board, juice board, history.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    HistoryResponse, JuiceBoardResponse, ScoreBoardResponse, StreakResponse, TopNParams,
};
use crate::app_state::AppState;
use crate::domain::Highscore;
use crate::error::{BoardError, ErrorResponse};

/// `GET /streak` — Current streak and its holder.
///
/// # Errors
///
/// Returns [`BoardError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/streak",
    tag = "Boards",
    summary = "Current streak",
    description = "Length of the run of consecutive firsts ending at the most recent claim. Zero when nobody has claimed yet.",
    responses(
        (status = 200, description = "Current streak", body = StreakResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn current_streak(State(state): State<AppState>) -> Result<impl IntoResponse, BoardError> {
    let run = state.claim_service.current_run().await?;
    Ok(Json(StreakResponse::from(run)))
}

/// `GET /boards/score` — Members ranked by number of firsts.
///
/// # Errors
///
/// Returns [`BoardError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/boards/score",
    tag = "Boards",
    summary = "Score board",
    description = "Members ranked by number of firsts won, plus the holder of the running streak.",
    params(TopNParams),
    responses(
        (status = 200, description = "Score board", body = ScoreBoardResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn score_board(
    State(state): State<AppState>,
    Query(params): Query<TopNParams>,
) -> Result<impl IntoResponse, BoardError> {
    let top_n = params.resolve(state.leaderboard_size);
    let board = state.claim_service.score_board(top_n).await?;
    Ok(Json(ScoreBoardResponse::from(board)))
}

/// `GET /boards/juice` — Members ranked by total juice.
///
/// # Errors
///
/// Returns [`BoardError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/boards/juice",
    tag = "Boards",
    summary = "Juice board",
    description = "Members ranked by total minutes between midnight and their firsts, plus the best single-day juice ever recorded.",
    params(TopNParams),
    responses(
        (status = 200, description = "Juice board", body = JuiceBoardResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn juice_board(
    State(state): State<AppState>,
    Query(params): Query<TopNParams>,
) -> Result<impl IntoResponse, BoardError> {
    let top_n = params.resolve(state.leaderboard_size);
    let board = state.claim_service.juice_board(top_n).await?;
    Ok(Json(JuiceBoardResponse::from(board)))
}

/// `GET /boards/juice/highscore` — Best single-day juice.
///
/// # Errors
///
/// Returns [`BoardError::EmptyLog`] when nobody has claimed yet, or
/// [`BoardError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/boards/juice/highscore",
    tag = "Boards",
    summary = "Juice highscore",
    description = "The single claim made latest in its civil day, across the whole log.",
    responses(
        (status = 200, description = "Highscore", body = Highscore),
        (status = 404, description = "No claims yet", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn juice_highscore(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, BoardError> {
    Ok(Json(state.claim_service.global_highscore().await?))
}

/// `GET /history` — Cumulative firsts per member at every claim.
///
/// # Errors
///
/// Returns [`BoardError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/history",
    tag = "Boards",
    summary = "Firsts to date",
    description = "One point per claim with the claimant's running total, suitable for plotting firsts over time.",
    responses(
        (status = 200, description = "History series", body = HistoryResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn history(State(state): State<AppState>) -> Result<impl IntoResponse, BoardError> {
    let data = state.claim_service.firsts_to_date().await?;
    Ok(Json(HistoryResponse { data }))
}

/// Reporting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/streak", get(current_streak))
        .route("/boards/score", get(score_board))
        .route("/boards/juice", get(juice_board))
        .route("/boards/juice/highscore", get(juice_highscore))
        .route("/history", get(history))
}
