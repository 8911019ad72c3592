//! Domain layer: claim log types, civil time, and the pure calculators.
//!
//! Everything here is synchronous and storage-agnostic. The streak, juice
//! and tally modules are folds over an ordered `&[ClaimEvent]` snapshot and
//! never mutate it.

pub mod board_event;
pub mod civil_time;
pub mod claim_event;
pub mod event_bus;
pub mod juice;
pub mod streak;
pub mod tally;
pub mod user_id;

pub use board_event::BoardEvent;
pub use civil_time::{CivilZone, Clock, FixedClock, SystemClock};
pub use claim_event::{ClaimEvent, ClaimOutcome, RejectReason};
pub use event_bus::EventBus;
pub use juice::{Highscore, JuiceTotal};
pub use streak::StreakRun;
pub use tally::{FirstsCount, HistoryPoint, UserStats};
pub use user_id::UserId;
