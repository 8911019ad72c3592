//! Persistence layer: the append-only claim log.
//!
//! [`ClaimStore`] is the contract every backend satisfies. Two backends
//! exist: [`postgres::PostgresClaimStore`] for durable storage via
//! `sqlx::PgPool`, and [`memory::InMemoryClaimStore`] used when persistence
//! is disabled and in tests.
//!
//! Both backends are the authoritative guard for the one-entry-per-civil-day
//! rule: an append for a day that already holds an entry fails with
//! [`BoardError::DayAlreadyClaimed`] and writes nothing.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{ClaimEvent, UserId};
use crate::error::BoardError;

pub use memory::InMemoryClaimStore;
pub use postgres::PostgresClaimStore;

/// Append-only, time-ordered log of accepted claims.
#[async_trait]
pub trait ClaimStore: Send + Sync + Debug {
    /// Appends a claim for `user_id` at `timestamp`, recorded against the
    /// civil date `civil_day`.
    ///
    /// Once this returns `Ok`, the entry is visible to every subsequent
    /// [`ClaimStore::all`] and [`ClaimStore::latest`] call.
    ///
    /// # Errors
    ///
    /// - [`BoardError::DayAlreadyClaimed`] if `civil_day` already has an entry.
    /// - [`BoardError::OutOfOrder`] if `timestamp` precedes the latest entry.
    /// - [`BoardError::StorageError`] if the backend is unreachable.
    async fn append(
        &self,
        user_id: &UserId,
        timestamp: DateTime<Utc>,
        civil_day: NaiveDate,
    ) -> Result<ClaimEvent, BoardError>;

    /// Returns every entry, ascending by timestamp with ties broken by id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the backend is unreachable.
    async fn all(&self) -> Result<Vec<ClaimEvent>, BoardError>;

    /// Returns the chronologically latest entry, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the backend is unreachable.
    async fn latest(&self) -> Result<Option<ClaimEvent>, BoardError>;
}
