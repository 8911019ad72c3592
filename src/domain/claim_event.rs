//! The unit of the append-only claim log and the arbitration outcome.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// One accepted daily claim.
///
/// Created only by the claim arbitrator, never mutated, never deleted.
/// The log orders entries by `timestamp`, breaking ties by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClaimEvent {
    /// Store-assigned sequence number, strictly increasing in arrival order.
    pub id: i64,
    /// Member who claimed.
    pub user_id: UserId,
    /// Instant the claim was accepted.
    pub timestamp: DateTime<Utc>,
}

/// Why a claim attempt was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// Someone already holds today's first.
    AlreadyClaimedToday {
        /// Civil date that is already taken.
        day: NaiveDate,
        /// Member holding that day, when known.
        holder: Option<UserId>,
    },
}

/// Result of a single claim attempt.
///
/// Rejection is an expected outcome, not a fault; storage failures travel
/// separately as [`crate::error::BoardError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The claim was recorded; carries the new log entry.
    Accepted(ClaimEvent),
    /// The day was already claimed; nothing was written.
    Rejected(RejectReason),
}

impl ClaimOutcome {
    /// Returns `true` for [`ClaimOutcome::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Returns the recorded entry, if the claim was accepted.
    #[must_use]
    pub const fn entry(&self) -> Option<&ClaimEvent> {
        match self {
            Self::Accepted(entry) => Some(entry),
            Self::Rejected(_) => None,
        }
    }
}
