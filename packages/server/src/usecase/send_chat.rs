//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - バリデーション順序（not joined → 空 → 長すぎ → roomId 不一致）と
//!   ブロードキャスト内容の組み立て
//!
//! ### なぜこのテストが必要か
//! - バリデーション順序はクライアントに返るエラーメッセージとして
//!   観測可能（未参加の接続には内容に関わらず "not joined" が返る）
//! - 500 文字の境界値はワイヤ仕様の一部
//!
//! ### どのような状況を想定しているか
//! - 正常系: 参加済み接続からの送信（roomId 指定あり / なし）
//! - 異常系: 未参加、空内容、長すぎる内容、別ルームの roomId 指定
//! - エッジケース: ちょうど 500 文字、前後空白のみの内容

use std::sync::Arc;

use studyroom_shared::time::now_timestamp_millis;

use crate::domain::{
    ChatContent, ConnectionId, MessageIdFactory, RealtimeHub, RoomId, RoomUser, Timestamp,
    ValueObjectError,
};

use super::error::ChatError;

/// A validated chat message ready for fan-out, including the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatBroadcast {
    /// Freshly generated message id
    pub id: String,
    /// The sender's bound room
    pub room_id: RoomId,
    /// The sender's resolved identity
    pub user: RoomUser,
    /// Trimmed, validated content
    pub content: ChatContent,
    /// Send time, Unix milliseconds
    pub timestamp: Timestamp,
}

/// チャット送信のユースケース
pub struct SendChatUseCase {
    /// RealtimeHub（presence 調整の抽象化）
    hub: Arc<dyn RealtimeHub>,
}

impl SendChatUseCase {
    /// 新しい SendChatUseCase を作成
    pub fn new(hub: Arc<dyn RealtimeHub>) -> Self {
        Self { hub }
    }

    /// チャット送信を実行
    ///
    /// バリデーションは順序どおりに行われ、最初に失敗した段階のエラーが
    /// 返る。成功時は状態を変更せず、ブロードキャスト内容だけを返す
    /// （fan-out は呼び出し側が `broadcast` で行う）。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続 ID
    /// * `room_id` - payload の roomId（任意。指定時はバインド先と一致が必要）
    /// * `raw_content` - クライアントが送った生の内容
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: Option<RoomId>,
        raw_content: &str,
    ) -> Result<ChatBroadcast, ChatError> {
        // 1. 送信者がバインド済みであること
        let bound_room = self
            .hub
            .joined_room(connection_id)
            .await
            .ok_or(ChatError::NotJoined)?;

        // 2. 内容のバリデーション（trim 後に空チェック → 文字数チェック）
        let content = match ChatContent::new(raw_content) {
            Ok(content) => content,
            Err(ValueObjectError::ChatContentTooLong { .. }) => {
                return Err(ChatError::ContentTooLong);
            }
            Err(_) => return Err(ChatError::ContentEmpty),
        };

        // 3. roomId が指定されていればバインド先と一致すること
        if let Some(requested) = room_id
            && requested != bound_room
        {
            return Err(ChatError::RoomIdMismatch);
        }

        let user = self
            .hub
            .joined_user(connection_id)
            .await
            .ok_or(ChatError::NotJoined)?;

        Ok(ChatBroadcast {
            id: MessageIdFactory::generate(),
            room_id: bound_room,
            user,
            content,
            timestamp: Timestamp::new(now_timestamp_millis()),
        })
    }

    /// 組み立て済みメッセージをルームへブロードキャスト
    pub async fn broadcast(&self, room_id: RoomId, message: &str) {
        self.hub.broadcast_to_room(room_id, message).await;
    }
}
