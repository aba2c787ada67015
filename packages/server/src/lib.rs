//! Realtime room presence and broadcast server for the study-room application.
//!
//! Tracks which logical users are connected to which room over long-lived
//! WebSocket connections, deduplicates multiple connections from the same
//! user, and fans out chat/status/presence events to every live connection
//! in a room. Durable entities (rooms, notes, pomodoro sessions) live in the
//! surrounding CRUD layer; this crate holds no persistent state.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
