//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::MemberDto;

/// Live presence view of one room.
///
/// Consumed by the surrounding CRUD layer: the room-listing endpoint reads
/// `count` to annotate each persisted room with its online-user count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPresenceDto {
    pub room_id: i64,
    pub members: Vec<MemberDto>,
    pub count: usize,
}
