//! WebSocket envelope DTOs for the realtime room protocol.
//!
//! Both directions share the `{"type": ..., "payload": ...}` envelope shape.
//! Inbound traffic is parsed in two phases (raw envelope, then the payload
//! for the routed type) so that an unknown type and a malformed payload can
//! be reported separately, each as an `error` envelope to the sender only.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::domain::PresenceStatus;

/// Raw inbound envelope: the type tag plus the still-untyped payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type", default)]
    pub message_type: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Parse a routed payload, treating an absent/null payload as empty.
pub fn parse_payload<T: DeserializeOwned + Default>(
    payload: serde_json::Value,
) -> Result<T, serde_json::Error> {
    if payload.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(payload)
}

/// Identity fields of a `join` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// `join` payload: target room plus optional client-supplied identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinPayload {
    pub room_id: Option<i64>,
    pub user: Option<UserPayload>,
}

/// `leave` payload (empty).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeavePayload {}

/// `chat` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatPayload {
    pub room_id: Option<i64>,
    pub content: Option<String>,
}

/// `timerStatus` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerStatusPayload {
    pub status: Option<String>,
}

/// Envelopes a client sends to the server. Used by the CLI client to
/// construct outbound messages; the server routes on the raw [`Envelope`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientEnvelope {
    Join(JoinPayload),
    Leave(LeavePayload),
    Chat(ChatPayload),
    TimerStatus(TimerStatusPayload),
}

/// User identity as carried in server envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsUserDto {
    pub id: String,
    pub name: String,
}

/// `joined` ack payload, sent to the joining connection only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedPayload {
    pub room_id: i64,
    pub user: WsUserDto,
}

/// `error` payload, sent to the offending connection only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// `chatMessage` broadcast payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub id: String,
    pub room_id: i64,
    pub user: WsUserDto,
    pub content: String,
    pub timestamp: i64,
}

/// `timerStatus` broadcast payload. `status` echoes the client-supplied
/// value (absent mapped to "idle"); the normalized status travels in the
/// follow-up `roomMembersUpdate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatusBroadcast {
    pub room_id: i64,
    pub user_id: String,
    pub status: String,
}

/// One roster entry of a `roomMembersUpdate` broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: String,
    pub name: String,
    pub status: PresenceStatus,
}

/// `roomMembersUpdate` broadcast payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMembersUpdatePayload {
    pub room_id: i64,
    pub members: Vec<MemberDto>,
    pub count: usize,
}

/// Envelopes the server sends to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerEnvelope {
    Joined(JoinedPayload),
    Error(ErrorPayload),
    ChatMessage(ChatMessagePayload),
    TimerStatus(TimerStatusBroadcast),
    RoomMembersUpdate(RoomMembersUpdatePayload),
}
