//! Message formatting utilities for client display.

use studyroom_server::infrastructure::dto::websocket::{
    ChatMessagePayload, ErrorPayload, JoinedPayload, RoomMembersUpdatePayload,
    TimerStatusBroadcast,
};
use studyroom_shared::time::timestamp_to_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the join acknowledgement showing the server-resolved identity
    pub fn format_joined(payload: &JoinedPayload) -> String {
        format!(
            "\n* Joined room {} as {} (id: {})\n",
            payload.room_id, payload.user.name, payload.user.id
        )
    }

    /// Format a roster update showing everyone currently in the room
    pub fn format_room_members(payload: &RoomMembersUpdatePayload) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!(
            "Room {} - {} online\n",
            payload.room_id, payload.count
        ));

        if payload.members.is_empty() {
            output.push_str("(No members)\n");
        } else {
            for member in &payload.members {
                output.push_str(&format!("{} [{}]\n", member.name, member.status.as_str()));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a chat message
    pub fn format_chat_message(payload: &ChatMessagePayload) -> String {
        let timestamp_str = timestamp_to_rfc3339(payload.timestamp);
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            payload.user.name, payload.content, timestamp_str
        )
    }

    /// Format a timer status notification
    pub fn format_timer_status(payload: &TimerStatusBroadcast) -> String {
        format!(
            "\n* user {} timer status: {}\n",
            payload.user_id, payload.status
        )
    }

    /// Format a server error
    pub fn format_error(payload: &ErrorPayload) -> String {
        format!("\n! server error: {}\n", payload.message)
    }

    /// Format an unparseable server message as raw text
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[Server] {}\n", text)
    }
}
