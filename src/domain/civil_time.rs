//! Civil time zone and clock abstractions.
//!
//! Every "calendar day" decision in the game is taken in one fixed civil
//! time zone ([`CivilZone`]). Raw UTC instants are never compared for day
//! equality. The current instant comes from an injectable [`Clock`] so
//! tests can pin "now".

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::BoardError;

/// Minutes in a civil day; juice values fall in `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// The single civil time zone used for day boundaries and juice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilZone(Tz);

impl CivilZone {
    /// Wraps an IANA time zone.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the wrapped time zone.
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Returns the civil calendar date on which `instant` falls.
    #[must_use]
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Returns `true` if both instants fall on the same civil date.
    #[must_use]
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_of(a) == self.day_of(b)
    }

    /// Minutes between local midnight and the local wall-clock time of
    /// `instant`, as `hours * 60 + minutes + seconds / 60`.
    ///
    /// Sub-second precision is ignored. On daylight-saving transition days
    /// the value follows the wall clock, not elapsed time.
    #[must_use]
    pub fn minutes_since_midnight(&self, instant: DateTime<Utc>) -> f64 {
        let local = instant.with_timezone(&self.0);
        f64::from(local.hour()) * 60.0 + f64::from(local.minute()) + f64::from(local.second()) / 60.0
    }
}

impl Default for CivilZone {
    fn default() -> Self {
        Self(chrono_tz::US::Eastern)
    }
}

impl fmt::Display for CivilZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl FromStr for CivilZone {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|e| BoardError::InvalidRequest(format!("unknown time zone {s:?}: {e}")))
    }
}

/// Source of the current instant.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}
