//! Claim DTOs for the claim endpoint and the log listing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{CivilZone, ClaimEvent, ClaimOutcome, RejectReason, UserId};

/// Request body for `POST /claims`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClaimRequest {
    /// Platform identifier of the member claiming.
    pub user_id: String,
    /// Channel the claim was posted in; checked when a claim channel is
    /// configured.
    #[serde(default)]
    pub channel_id: Option<String>,
}

/// Response body for `POST /claims`.
///
/// `201 Created` carries `accepted`; `200 OK` carries
/// `already_claimed_today`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClaimResponse {
    /// The caller took today's first.
    Accepted {
        /// The new log entry.
        entry: ClaimEvent,
        /// Civil date the entry counts for.
        civil_day: NaiveDate,
    },
    /// Someone already took today's first.
    AlreadyClaimedToday {
        /// Civil date that is taken.
        civil_day: NaiveDate,
        /// Member holding the day, when known.
        holder: Option<UserId>,
    },
}

impl ClaimResponse {
    /// Builds the response for an arbitration outcome.
    #[must_use]
    pub fn from_outcome(outcome: ClaimOutcome, zone: &CivilZone) -> Self {
        match outcome {
            ClaimOutcome::Accepted(entry) => Self::Accepted {
                civil_day: zone.day_of(entry.timestamp),
                entry,
            },
            ClaimOutcome::Rejected(RejectReason::AlreadyClaimedToday { day, holder }) => {
                Self::AlreadyClaimedToday {
                    civil_day: day,
                    holder,
                }
            }
        }
    }
}

/// Paginated list response for `GET /claims`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClaimListResponse {
    /// Log entries, oldest first.
    pub data: Vec<ClaimEvent>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
