//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - roomId 必須チェックと、Hub への委譲（識別子解決・再 join の扱い）
//!
//! ### なぜこのテストが必要か
//! - roomId 無しの join は一切の状態変更の前に拒否される必要がある
//! - 再 join でバインディングが二重にならないことを保証
//! - 匿名ユーザーの識別子解決（生成 ID / "Anonymous"）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系: roomId とユーザー識別子を指定した参加
//! - 異常系: roomId 欠損
//! - エッジケース: 識別子無しの匿名参加、leave 無しの再 join

use std::sync::Arc;

use crate::domain::{ConnectionId, PusherChannel, RealtimeHub, RoomId, RoomUser, SuppliedUser};

use super::error::JoinError;

/// Outcome of a successful join: the room and the resolved identity,
/// acknowledged back to the joining connection only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    pub room_id: RoomId,
    pub user: RoomUser,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// RealtimeHub（presence 調整の抽象化）
    hub: Arc<dyn RealtimeHub>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(hub: Arc<dyn RealtimeHub>) -> Self {
        Self { hub }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `sender` - 接続へのメッセージ送信用チャンネル
    /// * `room_id` - 参加先ルーム（payload から。欠損ならエラー）
    /// * `user` - クライアントが指定したユーザー識別子（任意）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedRoom)` - 参加成功（解決済みの識別子を含む）
    /// * `Err(JoinError)` - roomId 欠損（状態は変更されない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
        room_id: Option<RoomId>,
        user: SuppliedUser,
    ) -> Result<JoinedRoom, JoinError> {
        let room_id = room_id.ok_or(JoinError::RoomIdRequired)?;
        let user = self.hub.join(connection_id, sender, room_id, user).await;
        Ok(JoinedRoom { room_id, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::hub::InMemoryRealtimeHub;
    use tokio::sync::mpsc;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn create_test_usecase() -> (JoinRoomUseCase, Arc<InMemoryRealtimeHub>) {
        let hub = Arc::new(InMemoryRealtimeHub::new());
        (JoinRoomUseCase::new(hub.clone()), hub)
    }

    #[tokio::test]
    async fn test_join_success() {
        // テスト項目: roomId と識別子を指定した参加が成功する
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase
            .execute(
                conn("c1"),
                tx,
                Some(RoomId::new(1)),
                SuppliedUser {
                    id: Some("u1".to_string()),
                    name: Some("Alice".to_string()),
                },
            )
            .await;

        // then (期待する結果):
        let joined = result.unwrap();
        assert_eq!(joined.room_id, RoomId::new(1));
        assert_eq!(joined.user.id.as_str(), "u1");
        assert_eq!(joined.user.name.as_str(), "Alice");
        assert_eq!(hub.snapshot(RoomId::new(1)).await.count(), 1);
    }

    #[tokio::test]
    async fn test_join_without_room_id_fails_before_mutation() {
        // テスト項目: roomId 欠損の join は状態を変更せずに拒否される
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase
            .execute(conn("c1"), tx, None, SuppliedUser::default())
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(JoinError::RoomIdRequired));
        assert_eq!(hub.joined_room(&conn("c1")).await, None);
    }

    #[tokio::test]
    async fn test_join_anonymous_resolves_identity() {
        // テスト項目: 識別子無し・空白名の参加は生成 ID と "Anonymous" に解決される
        // given (前提条件):
        let (usecase, _hub) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase
            .execute(
                conn("c1"),
                tx,
                Some(RoomId::new(7)),
                SuppliedUser {
                    id: None,
                    name: Some(" ".to_string()),
                },
            )
            .await;

        // then (期待する結果):
        let joined = result.unwrap();
        assert_eq!(joined.user.id.as_str().len(), 36);
        assert_eq!(joined.user.name.as_str(), "Anonymous");
    }

    #[tokio::test]
    async fn test_rejoin_produces_single_binding() {
        // テスト項目: leave 無しの再 join でバインディングは 1 つだけになる
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();
        let supplied = SuppliedUser {
            id: Some("u1".to_string()),
            name: Some("Alice".to_string()),
        };
        usecase
            .execute(conn("c1"), tx.clone(), Some(RoomId::new(1)), supplied.clone())
            .await
            .unwrap();

        // when (操作):
        usecase
            .execute(conn("c1"), tx, Some(RoomId::new(2)), supplied)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(hub.joined_room(&conn("c1")).await, Some(RoomId::new(2)));
        assert_eq!(hub.snapshot(RoomId::new(1)).await.count(), 0);
        assert_eq!(hub.snapshot(RoomId::new(2)).await.count(), 1);
    }
}
