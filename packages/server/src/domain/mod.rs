//! Domain layer for the realtime presence server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod hub;
pub mod value_object;

pub use entity::{Member, PresenceBoard, RoomMember, RoomMembersSnapshot, SessionBinding};
pub use error::{NotJoinedError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory, UserIdFactory};
pub use hub::{PusherChannel, RealtimeHub, RoomUser, SuppliedUser};
pub use value_object::{
    ANONYMOUS_DISPLAY_NAME, ChatContent, ConnectionId, DisplayName, MAX_CHAT_CONTENT_CHARS,
    PresenceStatus, RoomId, Timestamp, UserId,
};
