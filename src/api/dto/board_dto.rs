//! Leaderboard, streak and history DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{FirstsCount, Highscore, HistoryPoint, JuiceTotal, StreakRun, UserId};
use crate::service::{JuiceBoard, ScoreBoard};

/// Response body for `GET /streak`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StreakResponse {
    /// Length of the run containing the latest first; 0 on an empty log.
    pub current_streak: usize,
    /// Member holding the current run.
    pub holder: Option<UserId>,
    /// When the current run started.
    pub started_at: Option<DateTime<Utc>>,
}

impl From<Option<StreakRun>> for StreakResponse {
    fn from(run: Option<StreakRun>) -> Self {
        match run {
            Some(run) => Self {
                current_streak: run.length,
                holder: Some(run.user_id),
                started_at: Some(run.started_at),
            },
            None => Self {
                current_streak: 0,
                holder: None,
                started_at: None,
            },
        }
    }
}

/// Response body for `GET /boards/score`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreBoardResponse {
    /// Top members by number of firsts.
    pub entries: Vec<FirstsCount>,
    /// Run containing the most recent first.
    pub most_recent: Option<StreakRun>,
}

impl From<ScoreBoard> for ScoreBoardResponse {
    fn from(board: ScoreBoard) -> Self {
        Self {
            entries: board.entries,
            most_recent: board.most_recent,
        }
    }
}

/// Response body for `GET /boards/juice`.
#[derive(Debug, Serialize, ToSchema)]
pub struct JuiceBoardResponse {
    /// Top members by summed juice (minutes).
    pub entries: Vec<JuiceTotal>,
    /// Best single-day juice ever recorded.
    pub highscore: Option<Highscore>,
}

impl From<JuiceBoard> for JuiceBoardResponse {
    fn from(board: JuiceBoard) -> Self {
        Self {
            entries: board.entries,
            highscore: board.highscore,
        }
    }
}

/// Response body for `GET /history`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    /// One point per log entry, oldest first.
    pub data: Vec<HistoryPoint>,
}
