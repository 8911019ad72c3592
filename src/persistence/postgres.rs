//! PostgreSQL implementation of the claim log.
//!
//! The `firstlist` table carries a `UNIQUE (claim_day)` constraint, which
//! makes the database the authoritative one-first-per-day guard across
//! every process sharing it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use super::ClaimStore;
use super::models::{CLAIM_COLUMNS, StoredClaim};
use crate::domain::{ClaimEvent, UserId};
use crate::error::BoardError;

/// PostgreSQL-backed claim store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresClaimStore {
    pool: PgPool,
}

impl PostgresClaimStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations in `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError::StorageError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), BoardError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| BoardError::StorageError(e.to_string()))
    }
}

#[async_trait]
impl ClaimStore for PostgresClaimStore {
    async fn append(
        &self,
        user_id: &UserId,
        timestamp: DateTime<Utc>,
        civil_day: NaiveDate,
    ) -> Result<ClaimEvent, BoardError> {
        let latest = self.latest().await?;
        if let Some(latest) = latest
            && timestamp < latest.timestamp
        {
            return Err(BoardError::OutOfOrder {
                latest: latest.timestamp,
                attempted: timestamp,
            });
        }

        let row = sqlx::query_as::<_, StoredClaim>(&format!(
            "INSERT INTO firstlist (user_id, timesent, claim_day) VALUES ($1, $2, $3) \
             RETURNING {CLAIM_COLUMNS}"
        ))
        .bind(user_id.as_str())
        .bind(timestamp)
        .bind(civil_day)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                BoardError::DayAlreadyClaimed(civil_day)
            }
            other => BoardError::from(other),
        })?;

        ClaimEvent::try_from(row)
    }

    async fn all(&self) -> Result<Vec<ClaimEvent>, BoardError> {
        let rows = sqlx::query_as::<_, StoredClaim>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM firstlist ORDER BY timesent ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ClaimEvent::try_from).collect()
    }

    async fn latest(&self) -> Result<Option<ClaimEvent>, BoardError> {
        let row = sqlx::query_as::<_, StoredClaim>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM firstlist ORDER BY timesent DESC, id DESC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        row.map(ClaimEvent::try_from).transpose()
    }
}
