//! Fan-out of claim arbitration results.
//!
//! Each call to `ClaimService::attempt_claim` ends with exactly one
//! [`BoardEvent`] on the bus. WebSocket connections hold a receiver each and
//! filter by member on their side.

use tokio::sync::broadcast;

use super::BoardEvent;

/// Broadcast bus for [`BoardEvent`]s.
///
/// A slow receiver that falls more than `capacity` events behind loses the
/// oldest ones and sees [`broadcast::error::RecvError::Lagged`].
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BoardEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes `event`, returning how many receivers it reached.
    ///
    /// With nobody listening the event is dropped and `0` is returned.
    pub fn publish(&self, event: BoardEvent) -> usize {
        let event_type = event.event_type_str();
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::debug!(event_type, delivered, "board event published");
        delivered
    }

    /// Opens a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers, i.e. open WebSocket feeds.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
