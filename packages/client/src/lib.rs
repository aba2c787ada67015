//! CLI client for the study-room realtime server.
//!
//! Connects to the server's WebSocket endpoint, joins a room, and maps
//! terminal input to protocol envelopes: plain lines become chat messages,
//! slash commands drive the pomodoro timer status and room membership.

pub mod command;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;
