//! UseCase: ルーム退出処理
//!
//! 明示的な `leave` エンベロープとトランスポート切断の両方がこの
//! ユースケースを通ります。退出は冪等で、未バインドの接続では何も
//! 起きません（切断と明示 leave が重なっても二重減算にならない）。

use std::sync::Arc;

use crate::domain::{ConnectionId, RealtimeHub, RoomId};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// RealtimeHub（presence 調整の抽象化）
    hub: Arc<dyn RealtimeHub>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(hub: Arc<dyn RealtimeHub>) -> Self {
        Self { hub }
    }

    /// ルーム退出を実行
    ///
    /// # Returns
    ///
    /// * `Some(RoomId)` - 接続が属していたルーム（呼び出し側が
    ///   roomMembersUpdate を broadcast するために使う）
    /// * `None` - 接続は未バインドだった（何も起きない）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        self.hub.leave(connection_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SuppliedUser;
    use crate::infrastructure::hub::InMemoryRealtimeHub;
    use tokio::sync::mpsc;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn create_test_usecase() -> (LeaveRoomUseCase, Arc<InMemoryRealtimeHub>) {
        let hub = Arc::new(InMemoryRealtimeHub::new());
        (LeaveRoomUseCase::new(hub.clone()), hub)
    }

    #[tokio::test]
    async fn test_leave_returns_bound_room() {
        // テスト項目: バインド済み接続の退出は属していたルームを返す
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();
        hub.join(
            conn("c1"),
            tx,
            RoomId::new(1),
            SuppliedUser {
                id: Some("u1".to_string()),
                name: Some("Alice".to_string()),
            },
        )
        .await;

        // when (操作):
        let result = usecase.execute(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(result, Some(RoomId::new(1)));
        assert_eq!(hub.snapshot(RoomId::new(1)).await.count(), 0);
    }

    #[tokio::test]
    async fn test_leave_unbound_connection_is_noop() {
        // テスト項目: 未バインドの接続の退出は何もしない
        // given (前提条件):
        let (usecase, _hub) = create_test_usecase();

        // when (操作):
        let result = usecase.execute(&conn("ghost")).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_leave_twice_decrements_once() {
        // テスト項目: 明示 leave の後の切断 leave は二重減算にならない
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let supplied = SuppliedUser {
            id: Some("u1".to_string()),
            name: Some("Alice".to_string()),
        };
        // 同一ユーザーが 2 接続で join
        hub.join(conn("c1"), tx1, RoomId::new(1), supplied.clone()).await;
        hub.join(conn("c2"), tx2, RoomId::new(1), supplied).await;

        // when (操作): c1 が明示 leave した後、トランスポート切断でもう一度 leave
        let first = usecase.execute(&conn("c1")).await;
        let second = usecase.execute(&conn("c1")).await;

        // then (期待する結果): 減算は 1 回だけで、c2 のメンバーは残る
        assert_eq!(first, Some(RoomId::new(1)));
        assert_eq!(second, None);
        assert_eq!(hub.snapshot(RoomId::new(1)).await.count(), 1);
    }
}
