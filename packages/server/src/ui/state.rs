//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    GetRoomPresenceUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendChatUseCase,
    UpdateTimerStatusUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendChatUseCase（チャット送信のユースケース）
    pub send_chat_usecase: Arc<SendChatUseCase>,
    /// UpdateTimerStatusUseCase（タイマーステータス更新のユースケース）
    pub update_timer_status_usecase: Arc<UpdateTimerStatusUseCase>,
    /// GetRoomPresenceUseCase（ルーム presence 取得のユースケース）
    pub get_room_presence_usecase: Arc<GetRoomPresenceUseCase>,
}
