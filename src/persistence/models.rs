//! Database row model for the `firstlist` table.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{ClaimEvent, UserId};
use crate::error::BoardError;

/// Column list shared by every `SELECT` on `firstlist`.
pub const CLAIM_COLUMNS: &str = "id, user_id, timesent, claim_day";

/// A stored row from the `firstlist` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredClaim {
    /// Auto-increment row ID.
    pub id: i64,
    /// Claimant identifier as stored.
    pub user_id: String,
    /// Instant the claim was accepted.
    pub timesent: DateTime<Utc>,
    /// Civil date the claim was recorded for (unique).
    pub claim_day: NaiveDate,
}

impl TryFrom<StoredClaim> for ClaimEvent {
    type Error = BoardError;

    fn try_from(row: StoredClaim) -> Result<Self, Self::Error> {
        let user_id = UserId::parse(&row.user_id).map_err(|e| {
            BoardError::StorageError(format!("corrupt user_id in row {}: {e}", row.id))
        })?;
        Ok(Self {
            id: row.id,
            user_id,
            timestamp: row.timesent,
        })
    }
}
