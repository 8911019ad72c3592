//! In-process claim log.
//!
//! [`InMemoryClaimStore`] keeps the log in a `Vec` behind a
//! [`tokio::sync::RwLock`]. Reads clone a snapshot under the read lock;
//! appends validate ordering and day uniqueness under the write lock, so
//! the rules hold even when callers bypass the service-level claim lock.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;

use super::ClaimStore;
use crate::domain::{ClaimEvent, UserId};
use crate::error::BoardError;

#[derive(Debug, Default)]
struct Log {
    entries: Vec<ClaimEvent>,
    days: HashSet<NaiveDate>,
}

/// Volatile claim store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryClaimStore {
    log: RwLock<Log>,
}

impl InMemoryClaimStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.log.read().await.entries.len()
    }

    /// Returns `true` if no claim has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.log.read().await.entries.is_empty()
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn append(
        &self,
        user_id: &UserId,
        timestamp: DateTime<Utc>,
        civil_day: NaiveDate,
    ) -> Result<ClaimEvent, BoardError> {
        let mut log = self.log.write().await;

        if let Some(latest) = log.entries.last()
            && timestamp < latest.timestamp
        {
            return Err(BoardError::OutOfOrder {
                latest: latest.timestamp,
                attempted: timestamp,
            });
        }
        if !log.days.insert(civil_day) {
            return Err(BoardError::DayAlreadyClaimed(civil_day));
        }

        let id = log
            .entries
            .last()
            .map_or(1, |latest| latest.id.saturating_add(1));
        let entry = ClaimEvent {
            id,
            user_id: user_id.clone(),
            timestamp,
        };
        log.entries.push(entry.clone());
        Ok(entry)
    }

    async fn all(&self) -> Result<Vec<ClaimEvent>, BoardError> {
        Ok(self.log.read().await.entries.clone())
    }

    async fn latest(&self) -> Result<Option<ClaimEvent>, BoardError> {
        Ok(self.log.read().await.entries.last().cloned())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(raw: &str) -> UserId {
        let Ok(id) = UserId::parse(raw) else {
            panic!("valid user id");
        };
        id
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap_or_default()
    }

    #[tokio::test]
    async fn append_then_read_back() {
        let store = InMemoryClaimStore::new();
        assert!(store.is_empty().await);
        assert!(matches!(store.latest().await, Ok(None)));

        let now = Utc::now();
        let Ok(entry) = store.append(&user("a"), now, day(1)).await else {
            panic!("append failed");
        };
        assert_eq!(entry.id, 1);
        assert_eq!(store.len().await, 1);

        let Ok(Some(latest)) = store.latest().await else {
            panic!("expected latest entry");
        };
        assert_eq!(latest, entry);
    }

    #[tokio::test]
    async fn ids_increase_in_arrival_order() {
        let store = InMemoryClaimStore::new();
        let t0 = Utc::now();
        let _ = store.append(&user("a"), t0, day(1)).await;
        let _ = store.append(&user("b"), t0 + Duration::days(1), day(2)).await;

        let Ok(all) = store.all().await else {
            panic!("read failed");
        };
        let ids: Vec<i64> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn second_append_for_same_day_is_refused() {
        let store = InMemoryClaimStore::new();
        let t0 = Utc::now();
        assert!(store.append(&user("a"), t0, day(1)).await.is_ok());

        let result = store
            .append(&user("b"), t0 + Duration::minutes(1), day(1))
            .await;
        assert!(matches!(result, Err(BoardError::DayAlreadyClaimed(d)) if d == day(1)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn append_before_latest_is_refused() {
        let store = InMemoryClaimStore::new();
        let t0 = Utc::now();
        assert!(store.append(&user("a"), t0, day(2)).await.is_ok());

        let result = store
            .append(&user("b"), t0 - Duration::days(1), day(1))
            .await;
        assert!(matches!(result, Err(BoardError::OutOfOrder { .. })));
        assert_eq!(store.len().await, 1);
    }
}
