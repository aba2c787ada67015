//! Request handlers: the WebSocket protocol router and the HTTP API.

mod http;
mod websocket;

pub use http::{get_room_presence, health_check};
pub use websocket::websocket_handler;
