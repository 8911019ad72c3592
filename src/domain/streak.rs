//! Streak run-length detection over the ordered claim log.
//!
//! A run is a maximal block of consecutive log entries owned by the same
//! user. Runs are found with a single fold that opens a new run whenever
//! the owner differs from the previous entry's owner.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{ClaimEvent, UserId};
use crate::error::BoardError;

/// A maximal run of consecutive entries owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StreakRun {
    /// Owner of every entry in the run.
    pub user_id: UserId,
    /// Number of entries in the run (always at least 1).
    pub length: usize,
    /// Timestamp of the first entry of the run.
    pub started_at: DateTime<Utc>,
    /// Timestamp of the last entry of the run.
    pub ended_at: DateTime<Utc>,
}

/// Splits the log into its runs, in log order.
#[must_use]
pub fn runs(log: &[ClaimEvent]) -> Vec<StreakRun> {
    log.iter().fold(Vec::new(), |mut runs: Vec<StreakRun>, entry| {
        match runs.last_mut() {
            Some(run) if run.user_id == entry.user_id => {
                run.length += 1;
                run.ended_at = entry.timestamp;
            }
            _ => runs.push(StreakRun {
                user_id: entry.user_id.clone(),
                length: 1,
                started_at: entry.timestamp,
                ended_at: entry.timestamp,
            }),
        }
        runs
    })
}

/// Returns the run containing the final entry, or `None` on an empty log.
#[must_use]
pub fn current_run(log: &[ClaimEvent]) -> Option<StreakRun> {
    let last = log.last()?;
    let length = log
        .iter()
        .rev()
        .take_while(|entry| entry.user_id == last.user_id)
        .count();
    let started_at = log
        .iter()
        .rev()
        .nth(length.saturating_sub(1))
        .map_or(last.timestamp, |entry| entry.timestamp);
    Some(StreakRun {
        user_id: last.user_id.clone(),
        length,
        started_at,
        ended_at: last.timestamp,
    })
}

/// Length of the run containing the final entry; `0` on an empty log.
#[must_use]
pub fn current_streak(log: &[ClaimEvent]) -> usize {
    current_run(log).map_or(0, |run| run.length)
}

/// Longest run anywhere in the log owned by `user_id`.
///
/// # Errors
///
/// Returns [`BoardError::UserNotFound`] if `user_id` owns no entries.
pub fn longest_streak_for_user(log: &[ClaimEvent], user_id: &UserId) -> Result<usize, BoardError> {
    runs(log)
        .into_iter()
        .filter(|run| &run.user_id == user_id)
        .map(|run| run.length)
        .max()
        .ok_or_else(|| BoardError::UserNotFound(user_id.clone()))
}
