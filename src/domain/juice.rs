//! Juice: how late in the civil day a first was claimed.
//!
//! Each entry scores the minutes between local midnight and its local
//! wall-clock time. Two aggregations are exposed and they answer different
//! questions: [`leaderboard`] sums per user, while [`global_highscore`]
//! picks the single latest-in-the-day entry ever recorded.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{CivilZone, ClaimEvent, UserId};
use crate::error::BoardError;

/// Summed juice of one user.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct JuiceTotal {
    /// Member the total belongs to.
    pub user_id: UserId,
    /// Sum of per-entry juice, in minutes.
    pub juice: f64,
}

/// The single entry with the most juice in the whole log.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Highscore {
    /// Member who made the claim.
    pub user_id: UserId,
    /// Juice of that one entry, in minutes.
    pub juice: f64,
    /// When the claim was made.
    pub claimed_at: DateTime<Utc>,
}

/// Juice of a single entry: minutes since local midnight, in `[0, 1440)`.
#[must_use]
pub fn per_entry_juice(zone: &CivilZone, entry: &ClaimEvent) -> f64 {
    zone.minutes_since_midnight(entry.timestamp)
}

/// Per-user juice totals, highest first.
///
/// Users with equal totals keep the order of their first claim.
#[must_use]
pub fn leaderboard(zone: &CivilZone, log: &[ClaimEvent]) -> Vec<JuiceTotal> {
    let mut slots: HashMap<&UserId, usize> = HashMap::new();
    let mut totals: Vec<JuiceTotal> = Vec::new();

    for entry in log {
        let juice = per_entry_juice(zone, entry);
        match slots.get(&entry.user_id).and_then(|&i| totals.get_mut(i)) {
            Some(total) => total.juice += juice,
            None => {
                slots.insert(&entry.user_id, totals.len());
                totals.push(JuiceTotal {
                    user_id: entry.user_id.clone(),
                    juice,
                });
            }
        }
    }

    totals.sort_by(|a, b| b.juice.total_cmp(&a.juice));
    totals
}

/// The entry with the maximum juice; ties go to the earliest entry.
///
/// # Errors
///
/// Returns [`BoardError::EmptyLog`] when the log has no entries.
pub fn global_highscore(zone: &CivilZone, log: &[ClaimEvent]) -> Result<Highscore, BoardError> {
    log.iter()
        .map(|entry| (entry, per_entry_juice(zone, entry)))
        .fold(None, |best: Option<(&ClaimEvent, f64)>, (entry, juice)| match best {
            Some((_, top)) if top >= juice => best,
            _ => Some((entry, juice)),
        })
        .map(|(entry, juice)| Highscore {
            user_id: entry.user_id.clone(),
            juice,
            claimed_at: entry.timestamp,
        })
        .ok_or(BoardError::EmptyLog)
}

/// Sum of juice over the entries owned by `user_id`; `0.0` when none.
#[must_use]
pub fn user_total_juice(zone: &CivilZone, log: &[ClaimEvent], user_id: &UserId) -> f64 {
    log.iter()
        .filter(|entry| &entry.user_id == user_id)
        .map(|entry| per_entry_juice(zone, entry))
        .sum()
}
