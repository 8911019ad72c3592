//! WebSocket layer: connection handling, message routing, follow lists.
//!
//! The WebSocket endpoint at `/ws` streams claim events to clients that
//! subscribe to specific members or to everyone.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
