//! Service layer: business logic orchestration.
//!
//! [`ClaimService`] arbitrates daily claims against the [`crate::persistence::ClaimStore`],
//! answers the streak, juice and tally queries, and emits events through the
//! [`crate::domain::EventBus`].

pub mod claim_service;

pub use claim_service::{ClaimService, JuiceBoard, ScoreBoard};
