//! Shared utilities for the study-room application.
//!
//! Logging setup and time helpers used by both the realtime server and the
//! CLI client.

pub mod logger;
pub mod time;
