//! Board error types with HTTP status code mapping.
//!
//! [`BoardError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! A claim that arrives after the day is taken is *not* an error; it is a
//! [`crate::domain::ClaimOutcome::Rejected`] outcome.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::UserId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "user has never claimed a first: 94235023560941568",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category         | HTTP Status                  |
/// |-----------|------------------|------------------------------|
/// | 1000–1999 | Validation       | 400 Bad Request              |
/// | 2000–2999 | State/Not Found  | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server           | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Claim posted from a channel other than the configured claim channel.
    #[error("claims are only accepted in channel {expected}")]
    WrongChannel {
        /// Channel where claims must be posted.
        expected: String,
    },

    /// Stats were requested for a user with no claim history.
    #[error("user has never claimed a first: {0}")]
    UserNotFound(UserId),

    /// A query needs at least one claim but the log is empty.
    #[error("no firsts have been claimed yet")]
    EmptyLog,

    /// The store already holds an entry for this civil day.
    #[error("first already recorded for {0}")]
    DayAlreadyClaimed(NaiveDate),

    /// An append would place an entry before the latest one.
    #[error("claim at {attempted} precedes latest entry at {latest}")]
    OutOfOrder {
        /// Timestamp of the latest stored entry.
        latest: DateTime<Utc>,
        /// Timestamp of the rejected append.
        attempted: DateTime<Utc>,
    },

    /// Storage layer failure, propagated without retry.
    #[error("storage error: {0}")]
    StorageError(String),
}

impl BoardError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::WrongChannel { .. } => 1002,
            Self::UserNotFound(_) => 2001,
            Self::EmptyLog => 2002,
            Self::DayAlreadyClaimed(_) => 2003,
            Self::OutOfOrder { .. } => 2004,
            Self::StorageError(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::WrongChannel { .. } => StatusCode::BAD_REQUEST,
            Self::UserNotFound(_) | Self::EmptyLog => StatusCode::NOT_FOUND,
            Self::DayAlreadyClaimed(_) | Self::OutOfOrder { .. } => StatusCode::CONFLICT,
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for BoardError {
    fn from(err: sqlx::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
