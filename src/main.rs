//! firstboard server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use firstboard::app_state::AppState;
use firstboard::config::BoardConfig;
use firstboard::domain::{EventBus, SystemClock};
use firstboard::persistence::{ClaimStore, InMemoryClaimStore, PostgresClaimStore};
use firstboard::service::ClaimService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = BoardConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    tracing::info!(
        addr = %config.listen_addr,
        zone = %config.civil_zone,
        "starting firstboard"
    );

    // Build persistence layer
    let store: Arc<dyn ClaimStore> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .context("connecting to PostgreSQL")?;
        let store = PostgresClaimStore::new(pool);
        store.migrate().await.context("running migrations")?;
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled; claims are kept in memory only");
        Arc::new(InMemoryClaimStore::new())
    };

    // Build service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let claim_service = Arc::new(ClaimService::new(
        store,
        config.civil_zone,
        Arc::new(SystemClock),
        event_bus.clone(),
        config.store_timeout,
    ));

    // Build application state
    let app_state = AppState {
        claim_service,
        event_bus,
        claim_channel_id: config.claim_channel_id.as_deref().map(Arc::from),
        leaderboard_size: config.leaderboard_size,
    };

    let app = firstboard::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
