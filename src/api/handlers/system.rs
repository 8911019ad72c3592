//! Root-level endpoints: liveness and the civil zone in force.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Liveness report.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
    /// Open WebSocket event feeds.
    pub ws_clients: usize,
}

/// `GET /health` — Liveness, version and live feed count.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Answers as long as the process is serving; includes the number of open WebSocket feeds.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        ws_clients: state.event_bus.receiver_count(),
    })
}

/// Active civil zone and the day it currently is there.
#[derive(Debug, Serialize, ToSchema)]
pub struct CivilZoneInfo {
    /// IANA name of the zone, e.g. `US/Eastern`.
    pub zone: String,
    /// Current civil date in that zone.
    pub today: NaiveDate,
}

/// `GET /config/civil-zone` — Zone that defines day boundaries.
#[utoipa::path(
    get,
    path = "/config/civil-zone",
    tag = "System",
    summary = "Civil time zone",
    description = "The time zone that decides when a new day (and a new first) begins, with today's date in that zone.",
    responses(
        (status = 200, description = "Civil zone", body = CivilZoneInfo),
    )
)]
pub async fn civil_zone_handler(State(state): State<AppState>) -> Json<CivilZoneInfo> {
    Json(CivilZoneInfo {
        zone: state.claim_service.zone().to_string(),
        today: state.claim_service.today(),
    })
}

/// Routes mounted outside `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/civil-zone", get(civil_zone_handler))
}
