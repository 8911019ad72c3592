//! Count-based views of the claim log: score board, per-user stats and
//! the cumulative firsts-to-date series.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{CivilZone, ClaimEvent, UserId, juice, streak};
use crate::error::BoardError;

/// Number of firsts won by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FirstsCount {
    /// Member the count belongs to.
    pub user_id: UserId,
    /// Entries owned by the member.
    pub firsts: usize,
}

/// Running count of a user's firsts at one of their entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HistoryPoint {
    /// Owner of the entry.
    pub user_id: UserId,
    /// When the entry was claimed.
    pub timestamp: DateTime<Utc>,
    /// Owner's firsts up to and including this entry.
    pub firsts_to_date: usize,
}

/// Statistics bundle for a single user.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserStats {
    /// Member the stats describe.
    pub user_id: UserId,
    /// Number of firsts won.
    pub score: usize,
    /// Summed juice, in minutes.
    pub juice: f64,
    /// Longest run of consecutive firsts.
    pub longest_streak: usize,
}

/// Firsts per user, most first; equal counts keep first-claim order.
#[must_use]
pub fn score_board(log: &[ClaimEvent]) -> Vec<FirstsCount> {
    let mut slots: HashMap<&UserId, usize> = HashMap::new();
    let mut counts: Vec<FirstsCount> = Vec::new();

    for entry in log {
        match slots.get(&entry.user_id).and_then(|&i| counts.get_mut(i)) {
            Some(count) => count.firsts += 1,
            None => {
                slots.insert(&entry.user_id, counts.len());
                counts.push(FirstsCount {
                    user_id: entry.user_id.clone(),
                    firsts: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.firsts.cmp(&a.firsts));
    counts
}

/// One point per entry, carrying the owner's cumulative count.
#[must_use]
pub fn firsts_to_date(log: &[ClaimEvent]) -> Vec<HistoryPoint> {
    let mut seen: HashMap<&UserId, usize> = HashMap::new();
    log.iter()
        .map(|entry| {
            let count = seen.entry(&entry.user_id).or_insert(0);
            *count += 1;
            HistoryPoint {
                user_id: entry.user_id.clone(),
                timestamp: entry.timestamp,
                firsts_to_date: *count,
            }
        })
        .collect()
}

/// Score, juice and longest streak for `user_id`.
///
/// # Errors
///
/// Returns [`BoardError::UserNotFound`] if `user_id` never claimed a first.
pub fn user_stats(
    zone: &CivilZone,
    log: &[ClaimEvent],
    user_id: &UserId,
) -> Result<UserStats, BoardError> {
    let longest_streak = streak::longest_streak_for_user(log, user_id)?;
    let score = log.iter().filter(|entry| &entry.user_id == user_id).count();
    Ok(UserStats {
        user_id: user_id.clone(),
        score,
        juice: juice::user_total_juice(zone, log, user_id),
        longest_streak,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::streak::tests::daily_log;

    fn user(raw: &str) -> UserId {
        let Ok(id) = UserId::parse(raw) else {
            panic!("valid user id");
        };
        id
    }

    #[test]
    fn score_board_counts_and_orders() {
        let log = daily_log(&["B", "A", "A", "C", "A", "B"]);
        let board: Vec<(String, usize)> = score_board(&log)
            .into_iter()
            .map(|c| (c.user_id.to_string(), c.firsts))
            .collect();
        assert_eq!(
            board,
            vec![
                ("A".to_string(), 3),
                ("B".to_string(), 2),
                ("C".to_string(), 1)
            ]
        );
    }

    #[test]
    fn score_board_tie_keeps_first_claim_order() {
        let log = daily_log(&["B", "A"]);
        let order: Vec<UserId> = score_board(&log).into_iter().map(|c| c.user_id).collect();
        assert_eq!(order, vec![user("B"), user("A")]);
    }

    #[test]
    fn firsts_to_date_runs_per_user() {
        let log = daily_log(&["A", "B", "A", "A"]);
        let counts: Vec<usize> = firsts_to_date(&log)
            .into_iter()
            .map(|p| p.firsts_to_date)
            .collect();
        assert_eq!(counts, vec![1, 1, 2, 3]);
    }

    #[test]
    fn user_stats_bundle() {
        let zone = CivilZone::default();
        let log = daily_log(&["A", "A", "B", "A"]);
        let Ok(stats) = user_stats(&zone, &log, &user("A")) else {
            panic!("expected stats");
        };
        assert_eq!(stats.score, 3);
        assert_eq!(stats.longest_streak, 2);
        // daily_log claims at 12:00 Eastern.
        assert!((stats.juice - 3.0 * 720.0).abs() < 1e-9);
    }

    #[test]
    fn user_stats_for_stranger_is_not_found() {
        let zone = CivilZone::default();
        let log = daily_log(&["A"]);
        assert!(matches!(
            user_stats(&zone, &log, &user("Z")),
            Err(BoardError::UserNotFound(_))
        ));
    }
}
