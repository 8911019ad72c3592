//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::ClaimService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Claim service for all business logic.
    pub claim_service: Arc<ClaimService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Only channel where claims are accepted; `None` accepts any channel.
    pub claim_channel_id: Option<Arc<str>>,
    /// Default number of rows on leaderboards.
    pub leaderboard_size: usize,
}
