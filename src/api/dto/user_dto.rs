//! Per-user DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::UserId;

/// Response body for `GET /users/:user_id/streak`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserStreakResponse {
    /// Member queried.
    pub user_id: UserId,
    /// Longest run of consecutive firsts.
    pub longest_streak: usize,
}

/// Response body for `GET /users/:user_id/juice`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserJuiceResponse {
    /// Member queried.
    pub user_id: UserId,
    /// Summed juice in minutes; 0 if the member never claimed.
    pub juice: f64,
}
