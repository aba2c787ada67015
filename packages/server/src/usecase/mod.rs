//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod get_room_presence;
pub mod join_room;
pub mod leave_room;
pub mod send_chat;
pub mod update_timer_status;

pub use error::{ChatError, JoinError, TimerStatusError};
pub use get_room_presence::GetRoomPresenceUseCase;
pub use join_room::{JoinRoomUseCase, JoinedRoom};
pub use leave_room::LeaveRoomUseCase;
pub use send_chat::{ChatBroadcast, SendChatUseCase};
pub use update_timer_status::{TimerStatusChange, UpdateTimerStatusUseCase};
