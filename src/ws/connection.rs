//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::Follows;
use crate::domain::{BoardEvent, UserId};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<BoardEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut follows = Follows::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut follows);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(board_event) => {
                        if let Some(json) = render_event(&board_event, &follows)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Serializes `event` for the client if it follows the member.
fn render_event(event: &BoardEvent, follows: &Follows) -> Option<String> {
    if !follows.wants(event.user_id()) {
        return None;
    }
    let msg = WsMessage::server(
        uuid::Uuid::new_v4().to_string(),
        WsMessageType::Event,
        serde_json::to_value(event).unwrap_or_default(),
    );
    serde_json::to_string(&msg).ok()
}

/// Splits raw ids into parsed members and the wildcard flag. Unparseable
/// ids are skipped.
fn parse_targets(raw: &[String]) -> (Vec<UserId>, bool) {
    let mut ids = Vec::new();
    let mut wildcard = false;
    for s in raw {
        if s.trim() == "*" {
            wildcard = true;
        } else if let Ok(id) = UserId::parse(s) {
            ids.push(id);
        }
    }
    (ids, wildcard)
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, follows: &mut Follows) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    if msg.msg_type != WsMessageType::Command {
        return serde_json::to_string(&WsMessage::error(msg.id, 400, "expected a command")).ok();
    }

    let response = match serde_json::from_value::<WsCommand>(msg.payload) {
        Ok(WsCommand::Subscribe { user_ids }) => {
            let (ids, wildcard) = parse_targets(&user_ids);
            follows.follow(&ids, wildcard);
            WsMessage::server(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": ids.iter().map(UserId::as_str).collect::<Vec<_>>(),
                    "count": follows.len(),
                    "wildcard": follows.follows_everyone(),
                }),
            )
        }
        Ok(WsCommand::Unsubscribe { user_ids }) => {
            let (ids, wildcard) = parse_targets(&user_ids);
            follows.unfollow(&ids, wildcard);
            WsMessage::server(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": ids.iter().map(UserId::as_str).collect::<Vec<_>>(),
                    "remaining_count": follows.len(),
                    "wildcard": follows.follows_everyone(),
                }),
            )
        }
        Err(_) => WsMessage::error(msg.id, 404, "unknown command"),
    };
    serde_json::to_string(&response).ok()
}
