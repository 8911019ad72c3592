//! Claim handlers: take today's first, list the log.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{
    ClaimListResponse, ClaimRequest, ClaimResponse, PaginationMeta, PaginationParams,
};
use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::{BoardError, ErrorResponse};

/// `POST /claims` — Attempt to take today's first.
///
/// # Errors
///
/// Returns [`BoardError`] on an invalid user id, a claim from the wrong
/// channel, or a storage failure. A day that is already taken is not an
/// error: it answers `200` with `already_claimed_today`.
#[utoipa::path(
    post,
    path = "/api/v1/claims",
    tag = "Claims",
    summary = "Claim today's first",
    description = "Records the caller as today's first if nobody has claimed the current civil day yet. Exactly one claim per civil day is ever accepted.",
    request_body = ClaimRequest,
    responses(
        (status = 201, description = "First claimed", body = ClaimResponse),
        (status = 200, description = "Today's first was already claimed", body = ClaimResponse),
        (status = 400, description = "Invalid user id or wrong channel", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_claim(
    State(state): State<AppState>,
    Json(req): Json<ClaimRequest>,
) -> Result<impl IntoResponse, BoardError> {
    if let Some(expected) = state.claim_channel_id.as_deref()
        && req.channel_id.as_deref().map(str::trim) != Some(expected)
    {
        return Err(BoardError::WrongChannel {
            expected: expected.to_string(),
        });
    }

    let user_id = UserId::parse(&req.user_id)?;
    let outcome = state.claim_service.claim_now(&user_id).await?;

    let status = if outcome.is_accepted() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let zone = state.claim_service.zone();
    Ok((status, Json(ClaimResponse::from_outcome(outcome, &zone))))
}

/// `GET /claims` — List the claim log, oldest first.
///
/// # Errors
///
/// Returns [`BoardError::StorageError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/claims",
    tag = "Claims",
    summary = "List claims",
    description = "Returns a paginated view of the append-only claim log in arrival order.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated claim log", body = ClaimListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_claims(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, BoardError> {
    let params = params.clamped();
    let log = state.claim_service.log().await?;

    let total = u32::try_from(log.len()).unwrap_or(u32::MAX);
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = total.div_ceil(per_page);

    let start = usize::try_from(u64::from(page - 1) * u64::from(per_page)).unwrap_or(usize::MAX);
    let data = log
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Ok(Json(ClaimListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Claim routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/claims", post(create_claim).get(list_claims))
}
