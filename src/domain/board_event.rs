//! Domain events emitted after every claim arbitration.
//!
//! Every attempt publishes a [`BoardEvent`] through the [`super::EventBus`].
//! Events are broadcast to WebSocket subscribers; the claim log itself is
//! the durable record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{ClaimEvent, UserId};

/// Event broadcast after a claim attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// A member took today's first.
    FirstClaimed {
        /// The new log entry.
        entry: ClaimEvent,
        /// Civil date the entry was recorded for.
        civil_day: NaiveDate,
        /// Current streak including the new entry; absent when the log
        /// could not be read back after the append.
        #[serde(skip_serializing_if = "Option::is_none")]
        current_streak: Option<usize>,
    },

    /// A claim attempt arrived after the day was already taken.
    ClaimRejected {
        /// Member who attempted the claim.
        user_id: UserId,
        /// Civil date that was already taken.
        civil_day: NaiveDate,
        /// Member holding the day, when known.
        holder: Option<UserId>,
        /// When the attempt arrived.
        attempted_at: DateTime<Utc>,
    },
}

impl BoardEvent {
    /// Returns the member who triggered this event.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::FirstClaimed { entry, .. } => &entry.user_id,
            Self::ClaimRejected { user_id, .. } => user_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::FirstClaimed { .. } => "first_claimed",
            Self::ClaimRejected { .. } => "claim_rejected",
        }
    }
}
