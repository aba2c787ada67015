//! UseCase: ルーム presence 取得処理
//!
//! WebSocket の roomMembersUpdate broadcast と HTTP の presence エンド
//! ポイントの両方がこのユースケースを通ります。周辺の CRUD 層は
//! スナップショットの `count` をルーム一覧のオンライン人数表示に使います。

use std::sync::Arc;

use crate::domain::{RealtimeHub, RoomId, RoomMembersSnapshot};

/// ルーム presence 取得のユースケース
pub struct GetRoomPresenceUseCase {
    /// RealtimeHub（presence 調整の抽象化）
    hub: Arc<dyn RealtimeHub>,
}

impl GetRoomPresenceUseCase {
    /// 新しい GetRoomPresenceUseCase を作成
    pub fn new(hub: Arc<dyn RealtimeHub>) -> Self {
        Self { hub }
    }

    /// ルームの roster スナップショットを取得
    ///
    /// 未知のルームは空のスナップショット（count 0）になる。
    pub async fn execute(&self, room_id: RoomId) -> RoomMembersSnapshot {
        self.hub.snapshot(room_id).await
    }

    /// roomMembersUpdate エンベロープをルームへブロードキャスト
    pub async fn broadcast(&self, room_id: RoomId, message: &str) {
        self.hub.broadcast_to_room(room_id, message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, SuppliedUser};
    use crate::infrastructure::hub::InMemoryRealtimeHub;
    use tokio::sync::mpsc;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn create_test_usecase() -> (GetRoomPresenceUseCase, Arc<InMemoryRealtimeHub>) {
        let hub = Arc::new(InMemoryRealtimeHub::new());
        (GetRoomPresenceUseCase::new(hub.clone()), hub)
    }

    #[tokio::test]
    async fn test_unknown_room_yields_empty_snapshot() {
        // テスト項目: 未知のルームは空のスナップショットになる（エラーにならない）
        // given (前提条件):
        let (usecase, _hub) = create_test_usecase();

        // when (操作):
        let snapshot = usecase.execute(RoomId::new(99)).await;

        // then (期待する結果):
        assert_eq!(snapshot.count(), 0);
        assert!(snapshot.members.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_lists_members_sorted_by_name() {
        // テスト項目: スナップショットは表示名の昇順でソートされる
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        hub.join(
            conn("c1"),
            tx1,
            RoomId::new(1),
            SuppliedUser {
                id: Some("u1".to_string()),
                name: Some("Bob".to_string()),
            },
        )
        .await;
        hub.join(
            conn("c2"),
            tx2,
            RoomId::new(1),
            SuppliedUser {
                id: Some("u2".to_string()),
                name: Some("Alice".to_string()),
            },
        )
        .await;

        // when (操作):
        let snapshot = usecase.execute(RoomId::new(1)).await;

        // then (期待する結果):
        assert_eq!(snapshot.count(), 2);
        assert_eq!(snapshot.members[0].name.as_str(), "Alice");
        assert_eq!(snapshot.members[1].name.as_str(), "Bob");
    }
}
