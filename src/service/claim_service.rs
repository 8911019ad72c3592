//! Claim service: arbitrates daily claims and answers reporting queries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::domain::{
    BoardEvent, CivilZone, ClaimEvent, ClaimOutcome, Clock, EventBus, FirstsCount, Highscore,
    HistoryPoint, JuiceTotal, RejectReason, StreakRun, UserId, UserStats, juice, streak, tally,
};
use crate::error::BoardError;
use crate::persistence::ClaimStore;

/// Count leaderboard plus the holder of the running streak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    /// Top users by number of firsts.
    pub entries: Vec<FirstsCount>,
    /// Run containing the most recent first, if any.
    pub most_recent: Option<StreakRun>,
}

/// Juice leaderboard plus the all-time single-day highscore.
#[derive(Debug, Clone, PartialEq)]
pub struct JuiceBoard {
    /// Top users by summed juice.
    pub entries: Vec<JuiceTotal>,
    /// Best single entry, `None` on an empty log.
    pub highscore: Option<Highscore>,
}

/// Orchestration layer for the first-claim game.
///
/// Every claim goes through [`ClaimService::attempt_claim`], which holds
/// `claim_lock` across "read latest" and "append" so two attempts in this
/// process can never both observe an unclaimed day. The store's own
/// per-day uniqueness covers other processes sharing the same database.
///
/// Reporting methods read one [`ClaimStore::all`] snapshot per call and
/// fold over it; they never write.
#[derive(Debug)]
pub struct ClaimService {
    store: Arc<dyn ClaimStore>,
    zone: CivilZone,
    clock: Arc<dyn Clock>,
    event_bus: EventBus,
    claim_lock: Mutex<()>,
    store_timeout: Duration,
}

impl ClaimService {
    /// Creates a new `ClaimService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn ClaimStore>,
        zone: CivilZone,
        clock: Arc<dyn Clock>,
        event_bus: EventBus,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            zone,
            clock,
            event_bus,
            claim_lock: Mutex::new(()),
            store_timeout,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the civil zone used for day boundaries.
    #[must_use]
    pub const fn zone(&self) -> CivilZone {
        self.zone
    }

    /// Returns today's civil date according to the service clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.zone.day_of(self.clock.now())
    }

    /// Attempts a claim for `user_id` at the clock's current instant.
    ///
    /// # Errors
    ///
    /// See [`ClaimService::attempt_claim`].
    pub async fn claim_now(&self, user_id: &UserId) -> Result<ClaimOutcome, BoardError> {
        self.attempt_claim(user_id, self.clock.now()).await
    }

    /// Attempts to take the first of the civil day containing `now`.
    ///
    /// An empty log counts as unclaimed, so the first-ever claim succeeds.
    ///
    /// # Errors
    ///
    /// - [`BoardError::StorageError`] if the store fails or times out.
    /// - [`BoardError::OutOfOrder`] if `now` precedes the latest entry.
    pub async fn attempt_claim(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, BoardError> {
        let today = self.zone.day_of(now);
        let _guard = self.claim_lock.lock().await;

        let latest = self.bounded("latest", self.store.latest()).await?;
        if let Some(latest) = latest
            && self.zone.day_of(latest.timestamp) == today
        {
            return Ok(self.reject(user_id, today, Some(latest.user_id), now));
        }

        let appended =
            match tokio::time::timeout(self.store_timeout, self.store.append(user_id, now, today))
                .await
            {
                Ok(result) => result,
                Err(_) => self.confirm_append(user_id, now, today).await,
            };
        let entry = match appended {
            Ok(entry) => entry,
            Err(BoardError::DayAlreadyClaimed(day)) => {
                return Ok(self.reject(user_id, day, None, now));
            }
            Err(e) => {
                tracing::error!(%user_id, error = %e, "claim append failed");
                return Err(e);
            }
        };

        let current_streak = match self.snapshot().await {
            Ok(log) => Some(streak::current_streak(&log)),
            Err(e) => {
                tracing::warn!(error = %e, "streak unavailable after claim");
                None
            }
        };

        let _ = self.event_bus.publish(BoardEvent::FirstClaimed {
            entry: entry.clone(),
            civil_day: today,
            current_streak,
        });

        tracing::info!(%user_id, %today, id = entry.id, ?current_streak, "first claimed");
        Ok(ClaimOutcome::Accepted(entry))
    }

    /// Returns the full log, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn log(&self) -> Result<Vec<ClaimEvent>, BoardError> {
        self.snapshot().await
    }

    /// Length of the run containing the latest entry; `0` on an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn current_streak(&self) -> Result<usize, BoardError> {
        Ok(streak::current_streak(&self.snapshot().await?))
    }

    /// The run containing the latest entry, with its holder.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn current_run(&self) -> Result<Option<StreakRun>, BoardError> {
        Ok(streak::current_run(&self.snapshot().await?))
    }

    /// Longest run of consecutive firsts owned by `user_id`.
    ///
    /// # Errors
    ///
    /// - [`BoardError::UserNotFound`] if the user never claimed.
    /// - [`BoardError::StorageError`] if the store fails or times out.
    pub async fn longest_streak_for_user(&self, user_id: &UserId) -> Result<usize, BoardError> {
        streak::longest_streak_for_user(&self.snapshot().await?, user_id)
    }

    /// Top `top_n` users by summed juice.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn leaderboard(&self, top_n: usize) -> Result<Vec<JuiceTotal>, BoardError> {
        let mut board = juice::leaderboard(&self.zone, &self.snapshot().await?);
        board.truncate(top_n);
        Ok(board)
    }

    /// The single entry with the most juice ever recorded.
    ///
    /// # Errors
    ///
    /// - [`BoardError::EmptyLog`] if no first was ever claimed.
    /// - [`BoardError::StorageError`] if the store fails or times out.
    pub async fn global_highscore(&self) -> Result<Highscore, BoardError> {
        juice::global_highscore(&self.zone, &self.snapshot().await?)
    }

    /// Summed juice of `user_id`; `0.0` when the user never claimed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn user_total_juice(&self, user_id: &UserId) -> Result<f64, BoardError> {
        Ok(juice::user_total_juice(
            &self.zone,
            &self.snapshot().await?,
            user_id,
        ))
    }

    /// Juice leaderboard and highscore computed from one snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn juice_board(&self, top_n: usize) -> Result<JuiceBoard, BoardError> {
        let log = self.snapshot().await?;
        let mut entries = juice::leaderboard(&self.zone, &log);
        entries.truncate(top_n);
        Ok(JuiceBoard {
            entries,
            highscore: juice::global_highscore(&self.zone, &log).ok(),
        })
    }

    /// Top `top_n` users by number of firsts, plus the current run.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn score_board(&self, top_n: usize) -> Result<ScoreBoard, BoardError> {
        let log = self.snapshot().await?;
        let mut entries = tally::score_board(&log);
        entries.truncate(top_n);
        Ok(ScoreBoard {
            entries,
            most_recent: streak::current_run(&log),
        })
    }

    /// Score, juice and longest streak for `user_id`.
    ///
    /// # Errors
    ///
    /// - [`BoardError::UserNotFound`] if the user never claimed.
    /// - [`BoardError::StorageError`] if the store fails or times out.
    pub async fn user_stats(&self, user_id: &UserId) -> Result<UserStats, BoardError> {
        tally::user_stats(&self.zone, &self.snapshot().await?, user_id)
    }

    /// Cumulative firsts per user at every entry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageError`] if the store fails or times out.
    pub async fn firsts_to_date(&self) -> Result<Vec<HistoryPoint>, BoardError> {
        Ok(tally::firsts_to_date(&self.snapshot().await?))
    }

    /// Resolves an append whose reply outlived the store timeout.
    ///
    /// The write may still have landed. If the latest entry is exactly this
    /// attempt, the claim counts as accepted; otherwise the timeout stands.
    async fn confirm_append(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<ClaimEvent, BoardError> {
        tracing::warn!(%user_id, %today, "store append timed out, re-reading latest entry");
        match self.bounded("latest", self.store.latest()).await? {
            Some(latest)
                if &latest.user_id == user_id
                    && latest.timestamp == now
                    && self.zone.day_of(latest.timestamp) == today =>
            {
                Ok(latest)
            }
            _ => Err(BoardError::StorageError(format!(
                "store append timed out after {} ms",
                self.store_timeout.as_millis()
            ))),
        }
    }

    async fn snapshot(&self) -> Result<Vec<ClaimEvent>, BoardError> {
        self.bounded("all", self.store.all()).await
    }

    /// Runs a store call under the configured timeout.
    async fn bounded<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, BoardError>>,
    ) -> Result<T, BoardError> {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(BoardError::StorageError(format!(
                    "store {op} timed out after {} ms",
                    self.store_timeout.as_millis()
                )))
            })
    }

    fn reject(
        &self,
        user_id: &UserId,
        day: NaiveDate,
        holder: Option<UserId>,
        attempted_at: DateTime<Utc>,
    ) -> ClaimOutcome {
        tracing::debug!(%user_id, %day, "first already claimed");
        let _ = self.event_bus.publish(BoardEvent::ClaimRejected {
            user_id: user_id.clone(),
            civil_day: day,
            holder: holder.clone(),
            attempted_at,
        });
        ClaimOutcome::Rejected(RejectReason::AlreadyClaimedToday { day, holder })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;
    use crate::persistence::InMemoryClaimStore;
    use async_trait::async_trait;
    use chrono::TimeZone;

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn user(raw: &str) -> UserId {
        let Ok(id) = UserId::parse(raw) else {
            panic!("valid user id");
        };
        id
    }

    fn eastern(d: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        let Some(local) = chrono_tz::US::Eastern
            .with_ymd_and_hms(2024, 3, d, h, m, s)
            .single()
        else {
            panic!("ambiguous local time");
        };
        local.with_timezone(&Utc)
    }

    fn make_service_with(store: Arc<dyn ClaimStore>) -> ClaimService {
        let clock = Arc::new(FixedClock::new(eastern(1, 9, 0, 0)));
        ClaimService::new(store, CivilZone::default(), clock, EventBus::new(1000), TIMEOUT)
    }

    fn make_service() -> ClaimService {
        make_service_with(Arc::new(InMemoryClaimStore::new()))
    }

    /// Claims for each owner on consecutive days at the given Eastern time.
    async fn seed(service: &ClaimService, owners: &[&str], h: u32, m: u32) {
        for (day, owner) in (1_u32..).zip(owners) {
            let Ok(outcome) = service.attempt_claim(&user(owner), eastern(day, h, m, 0)).await
            else {
                panic!("claim failed");
            };
            assert!(outcome.is_accepted());
        }
    }

    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl ClaimStore for BrokenStore {
        async fn append(
            &self,
            _user_id: &UserId,
            _timestamp: DateTime<Utc>,
            _civil_day: NaiveDate,
        ) -> Result<ClaimEvent, BoardError> {
            Err(BoardError::StorageError("connection refused".to_string()))
        }

        async fn all(&self) -> Result<Vec<ClaimEvent>, BoardError> {
            Err(BoardError::StorageError("connection refused".to_string()))
        }

        async fn latest(&self) -> Result<Option<ClaimEvent>, BoardError> {
            Ok(None)
        }
    }

    #[derive(Debug)]
    struct StalledStore;

    #[async_trait]
    impl ClaimStore for StalledStore {
        async fn append(
            &self,
            _user_id: &UserId,
            _timestamp: DateTime<Utc>,
            _civil_day: NaiveDate,
        ) -> Result<ClaimEvent, BoardError> {
            std::future::pending().await
        }

        async fn all(&self) -> Result<Vec<ClaimEvent>, BoardError> {
            std::future::pending().await
        }

        async fn latest(&self) -> Result<Option<ClaimEvent>, BoardError> {
            std::future::pending().await
        }
    }

    /// Writes immediately but acknowledges late.
    #[derive(Debug, Default)]
    struct SlowAckStore {
        inner: InMemoryClaimStore,
    }

    #[async_trait]
    impl ClaimStore for SlowAckStore {
        async fn append(
            &self,
            user_id: &UserId,
            timestamp: DateTime<Utc>,
            civil_day: NaiveDate,
        ) -> Result<ClaimEvent, BoardError> {
            let entry = self.inner.append(user_id, timestamp, civil_day).await?;
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(entry)
        }

        async fn all(&self) -> Result<Vec<ClaimEvent>, BoardError> {
            self.inner.all().await
        }

        async fn latest(&self) -> Result<Option<ClaimEvent>, BoardError> {
            self.inner.latest().await
        }
    }

    /// Accepts writes but cannot list the log.
    #[derive(Debug, Default)]
    struct NoListingStore {
        inner: InMemoryClaimStore,
    }

    #[async_trait]
    impl ClaimStore for NoListingStore {
        async fn append(
            &self,
            user_id: &UserId,
            timestamp: DateTime<Utc>,
            civil_day: NaiveDate,
        ) -> Result<ClaimEvent, BoardError> {
            self.inner.append(user_id, timestamp, civil_day).await
        }

        async fn all(&self) -> Result<Vec<ClaimEvent>, BoardError> {
            Err(BoardError::StorageError("replica unavailable".to_string()))
        }

        async fn latest(&self) -> Result<Option<ClaimEvent>, BoardError> {
            self.inner.latest().await
        }
    }

    #[tokio::test]
    async fn first_ever_claim_is_accepted() {
        let service = make_service();
        let Ok(outcome) = service.claim_now(&user("a")).await else {
            panic!("claim failed");
        };
        let Some(entry) = outcome.entry() else {
            panic!("expected acceptance");
        };
        assert_eq!(entry.user_id, user("a"));
        assert_eq!(entry.timestamp, eastern(1, 9, 0, 0));
    }

    #[tokio::test]
    async fn second_claim_same_day_is_rejected() {
        let service = make_service();
        let _ = service.attempt_claim(&user("a"), eastern(1, 0, 1, 0)).await;

        let Ok(outcome) = service.attempt_claim(&user("b"), eastern(1, 23, 59, 59)).await else {
            panic!("claim failed");
        };
        assert_eq!(
            outcome,
            ClaimOutcome::Rejected(RejectReason::AlreadyClaimedToday {
                day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
                holder: Some(user("a")),
            })
        );
        assert_eq!(service.log().await.map(|l| l.len()).ok(), Some(1));
    }

    #[tokio::test]
    async fn same_user_cannot_claim_twice() {
        let service = make_service();
        let _ = service.attempt_claim(&user("a"), eastern(1, 8, 0, 0)).await;
        let outcome = service.attempt_claim(&user("a"), eastern(1, 9, 0, 0)).await;
        assert!(matches!(outcome, Ok(ClaimOutcome::Rejected(_))));
    }

    #[tokio::test]
    async fn day_rolls_over_at_civil_midnight() {
        let service = make_service();
        // 23:30 Eastern on the 1st is already the 2nd in UTC.
        let _ = service.attempt_claim(&user("a"), eastern(1, 23, 30, 0)).await;

        let outcome = service.attempt_claim(&user("b"), eastern(1, 23, 45, 0)).await;
        assert!(matches!(outcome, Ok(ClaimOutcome::Rejected(_))));

        let outcome = service.attempt_claim(&user("b"), eastern(2, 0, 0, 1)).await;
        assert!(matches!(outcome, Ok(ClaimOutcome::Accepted(_))));
    }

    #[tokio::test]
    async fn at_most_one_acceptance_per_day_over_many_attempts() {
        let service = make_service();
        let mut accepted_days = Vec::new();
        for day in 1..=5 {
            for (hour, owner) in [(1, "a"), (7, "b"), (13, "c"), (22, "a")] {
                let Ok(outcome) = service.attempt_claim(&user(owner), eastern(day, hour, 0, 0)).await
                else {
                    panic!("claim failed");
                };
                if outcome.is_accepted() {
                    accepted_days.push(day);
                }
            }
        }
        assert_eq!(accepted_days, vec![1, 2, 3, 4, 5]);

        let Ok(log) = service.log().await else {
            panic!("log read failed");
        };
        assert_eq!(log.len(), 5);
        assert!(log.windows(2).all(|w| match w {
            [a, b] => a.timestamp <= b.timestamp && a.id < b.id,
            _ => false,
        }));
    }

    #[tokio::test]
    async fn parallel_attempts_yield_exactly_one_acceptance() {
        let service = Arc::new(make_service());
        let now = eastern(3, 12, 0, 0);

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.attempt_claim(&user(&format!("u{i}")), now).await })
            })
            .collect();

        let mut accepted = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await {
                Ok(Ok(ClaimOutcome::Accepted(_))) => accepted += 1,
                Ok(Ok(ClaimOutcome::Rejected(RejectReason::AlreadyClaimedToday { .. }))) => {
                    rejected += 1;
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(rejected, 31);
    }

    #[tokio::test]
    async fn store_guard_holds_when_services_share_a_store() {
        // Two services in "different processes": separate claim locks, one store.
        let store: Arc<dyn ClaimStore> = Arc::new(InMemoryClaimStore::new());
        let left = Arc::new(make_service_with(Arc::clone(&store)));
        let right = Arc::new(make_service_with(Arc::clone(&store)));
        let now = eastern(4, 6, 0, 0);

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = if i % 2 == 0 {
                Arc::clone(&left)
            } else {
                Arc::clone(&right)
            };
            handles.push(tokio::spawn(async move {
                service.attempt_claim(&user(&format!("u{i}")), now).await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if let Ok(Ok(outcome)) = handle.await
                && outcome.is_accepted()
            {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(store.all().await.map(|l| l.len()).ok(), Some(1));
    }

    #[tokio::test]
    async fn accepted_claim_emits_event_with_streak() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        seed(&service, &["a", "a"], 10, 0).await;
        let _ = rx.recv().await;

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        match event {
            BoardEvent::FirstClaimed { current_streak, .. } => {
                assert_eq!(current_streak, Some(2));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejected_claim_emits_event() {
        let service = make_service();
        let _ = service.attempt_claim(&user("a"), eastern(1, 1, 0, 0)).await;
        let mut rx = service.event_bus().subscribe();

        let _ = service.attempt_claim(&user("b"), eastern(1, 2, 0, 0)).await;
        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "claim_rejected");
        assert_eq!(event.user_id(), &user("b"));
    }

    #[tokio::test]
    async fn clock_moving_backwards_is_an_error() {
        let service = make_service();
        let _ = service.attempt_claim(&user("a"), eastern(5, 1, 0, 0)).await;
        let outcome = service.attempt_claim(&user("b"), eastern(4, 1, 0, 0)).await;
        assert!(matches!(outcome, Err(BoardError::OutOfOrder { .. })));
    }

    #[tokio::test]
    async fn storage_errors_propagate() {
        let service = make_service_with(Arc::new(BrokenStore));
        assert!(matches!(
            service.claim_now(&user("a")).await,
            Err(BoardError::StorageError(_))
        ));
        assert!(matches!(
            service.current_streak().await,
            Err(BoardError::StorageError(_))
        ));
    }

    #[tokio::test]
    async fn stalled_store_times_out() {
        let clock = Arc::new(FixedClock::new(eastern(1, 9, 0, 0)));
        let service = ClaimService::new(
            Arc::new(StalledStore),
            CivilZone::default(),
            clock,
            EventBus::new(10),
            Duration::from_millis(20),
        );
        let Err(BoardError::StorageError(message)) = service.claim_now(&user("a")).await else {
            panic!("expected a storage timeout");
        };
        assert!(message.contains("timed out"));
    }

    #[tokio::test]
    async fn streak_queries() {
        let service = make_service();
        seed(&service, &["a", "a", "a", "b", "b", "a"], 12, 0).await;

        assert_eq!(service.current_streak().await.ok(), Some(1));
        assert_eq!(service.longest_streak_for_user(&user("a")).await.ok(), Some(3));
        assert_eq!(service.longest_streak_for_user(&user("b")).await.ok(), Some(2));
        assert!(matches!(
            service.longest_streak_for_user(&user("z")).await,
            Err(BoardError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn empty_log_queries() {
        let service = make_service();
        assert_eq!(service.current_streak().await.ok(), Some(0));
        assert!(matches!(service.current_run().await, Ok(None)));
        assert!(matches!(
            service.global_highscore().await,
            Err(BoardError::EmptyLog)
        ));
        assert!(service.leaderboard(5).await.is_ok_and(|b| b.is_empty()));
        assert_eq!(service.user_total_juice(&user("a")).await.ok(), Some(0.0));

        let Ok(board) = service.juice_board(5).await else {
            panic!("juice board failed");
        };
        assert!(board.highscore.is_none());
    }

    #[tokio::test]
    async fn juice_leaderboard_and_highscore() {
        let service = make_service();
        let claims = [("x", 1, 0, 10), ("x", 2, 0, 20), ("y", 3, 0, 5), ("y", 4, 23, 20)];
        for (owner, day, h, m) in claims {
            let _ = service.attempt_claim(&user(owner), eastern(day, h, m, 0)).await;
        }

        let Ok(board) = service.leaderboard(10).await else {
            panic!("leaderboard failed");
        };
        let pairs: Vec<(String, f64)> = board
            .into_iter()
            .map(|t| (t.user_id.to_string(), t.juice))
            .collect();
        assert_eq!(pairs, vec![("y".to_string(), 1405.0), ("x".to_string(), 30.0)]);

        let Ok(high) = service.global_highscore().await else {
            panic!("highscore failed");
        };
        assert_eq!(high.user_id, user("y"));
        assert!((high.juice - 1400.0).abs() < 1e-9);

        assert!(service.leaderboard(1).await.is_ok_and(|b| b.len() == 1));
        let juice_x = service.user_total_juice(&user("x")).await.unwrap_or_default();
        assert!((juice_x - 30.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn score_board_and_stats() {
        let service = make_service();
        seed(&service, &["a", "b", "b", "a", "a"], 6, 0).await;

        let Ok(board) = service.score_board(5).await else {
            panic!("score board failed");
        };
        let counts: Vec<usize> = board.entries.iter().map(|c| c.firsts).collect();
        assert_eq!(counts, vec![3, 2]);
        let Some(run) = board.most_recent else {
            panic!("expected a current run");
        };
        assert_eq!((run.user_id, run.length), (user("a"), 2));

        let Ok(stats) = service.user_stats(&user("b")).await else {
            panic!("stats failed");
        };
        assert_eq!(stats.score, 2);
        assert_eq!(stats.longest_streak, 2);
        assert!((stats.juice - 720.0).abs() < 1e-9);

        let Ok(history) = service.firsts_to_date().await else {
            panic!("history failed");
        };
        assert_eq!(history.len(), 5);
        assert_eq!(history.last().map(|p| p.firsts_to_date), Some(3));
    }

    fn service_with_timeout(store: Arc<dyn ClaimStore>, timeout: Duration) -> ClaimService {
        let clock = Arc::new(FixedClock::new(eastern(1, 9, 0, 0)));
        ClaimService::new(store, CivilZone::default(), clock, EventBus::new(10), timeout)
    }

    #[tokio::test]
    async fn late_acknowledged_append_is_still_accepted() {
        let store: Arc<dyn ClaimStore> = Arc::new(SlowAckStore::default());
        let service = service_with_timeout(Arc::clone(&store), Duration::from_millis(20));

        let Ok(outcome) = service.claim_now(&user("a")).await else {
            panic!("a saved claim must not surface as a storage error");
        };
        let Some(entry) = outcome.entry() else {
            panic!("expected acceptance");
        };
        assert_eq!(entry.user_id, user("a"));
        assert_eq!(store.all().await.map(|l| l.len()).ok(), Some(1));

        let retry = service.claim_now(&user("b")).await;
        assert!(matches!(
            retry,
            Ok(ClaimOutcome::Rejected(RejectReason::AlreadyClaimedToday { holder: Some(h), .. }))
                if h == user("a")
        ));
    }

    #[tokio::test]
    async fn unreadable_log_after_claim_omits_streak() {
        let service = service_with_timeout(Arc::new(NoListingStore::default()), TIMEOUT);
        let mut rx = service.event_bus().subscribe();

        let outcome = service.claim_now(&user("a")).await;
        assert!(matches!(outcome, Ok(ClaimOutcome::Accepted(_))));

        let Ok(BoardEvent::FirstClaimed { current_streak, .. }) = rx.recv().await else {
            panic!("expected a first_claimed event");
        };
        assert_eq!(current_streak, None);
    }
}
