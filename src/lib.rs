//! # firstboard
//!
//! Service behind a chat community's daily "first" game. The first member
//! to claim on a civil day is recorded in an append-only log; the log feeds
//! streaks, the time-of-day "juice" metric and leaderboards.
//!
//! The chat bot is a client of this crate: it forwards claim attempts and
//! renders the structured results. Nothing here formats chat messages.
//!
//! ## Architecture
//!
//! ```text
//! Chat command layer (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── ClaimService (service/)   ── claim lock, timeouts
//!     ├── EventBus (domain/)
//!     │
//!     ├── streak / juice / tally (domain/)   ── pure folds
//!     │
//!     └── ClaimStore (persistence/)  ── PostgreSQL or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Upper bound on a single HTTP request; WebSocket sessions outlive it once
/// upgraded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the full application router: REST API, system routes and `/ws`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws::handler::ws_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
