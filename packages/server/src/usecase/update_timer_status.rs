//! UseCase: ポモドーロタイマーステータス更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateTimerStatusUseCase::execute() メソッド
//! - ステータスの正規化・保存と、broadcast 用エコー値の組み立て
//!
//! ### なぜこのテストが必要か
//! - roster に表示されるのは正規化済みの値、timerStatus broadcast で
//!   流れるのはクライアントが送った生の値（欠損は "idle"）という
//!   二重の扱いが観測可能な仕様であるため
//!
//! ### どのような状況を想定しているか
//! - 正常系: "focusing" / 大文字混じり / 未知の文字列
//! - 異常系: 未参加の接続
//! - エッジケース: status 欠損

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceStatus, RealtimeHub, RoomId, UserId};

use super::error::TimerStatusError;

/// Outcome of a status update, carrying both the raw echo for the
/// `timerStatus` broadcast and the normalized stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerStatusChange {
    pub room_id: RoomId,
    pub user_id: UserId,
    /// Client-supplied status as received (absent mapped to "idle")
    pub echo_status: String,
    /// Normalized status persisted on the member
    pub stored: PresenceStatus,
}

/// タイマーステータス更新のユースケース
pub struct UpdateTimerStatusUseCase {
    /// RealtimeHub（presence 調整の抽象化）
    hub: Arc<dyn RealtimeHub>,
}

impl UpdateTimerStatusUseCase {
    /// 新しい UpdateTimerStatusUseCase を作成
    pub fn new(hub: Arc<dyn RealtimeHub>) -> Self {
        Self { hub }
    }

    /// ステータス更新を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信者の接続 ID
    /// * `raw_status` - payload の status（任意）
    ///
    /// # Returns
    ///
    /// * `Ok(TimerStatusChange)` - 更新成功（broadcast 用の値を含む）
    /// * `Err(TimerStatusError)` - 未参加
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_status: Option<String>,
    ) -> Result<TimerStatusChange, TimerStatusError> {
        let room_id = self
            .hub
            .joined_room(connection_id)
            .await
            .ok_or(TimerStatusError::NotJoined)?;

        let stored = self
            .hub
            .update_status(connection_id, raw_status.as_deref())
            .await
            .map_err(|_| TimerStatusError::NotJoined)?;

        let user = self
            .hub
            .joined_user(connection_id)
            .await
            .ok_or(TimerStatusError::NotJoined)?;

        let echo_status =
            raw_status.unwrap_or_else(|| PresenceStatus::Idle.as_str().to_string());

        Ok(TimerStatusChange {
            room_id,
            user_id: user.id,
            echo_status,
            stored,
        })
    }

    /// timerStatus エンベロープをルームへブロードキャスト
    pub async fn broadcast(&self, room_id: RoomId, message: &str) {
        self.hub.broadcast_to_room(room_id, message).await;
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

    fn create_test_usecase() -> (UpdateTimerStatusUseCase, Arc<InMemoryRealtimeHub>) {
        let hub = Arc::new(InMemoryRealtimeHub::new());
        (UpdateTimerStatusUseCase::new(hub.clone()), hub)
    }

    async fn join(hub: &InMemoryRealtimeHub, connection: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        hub.join(
            conn(connection),
            tx,
            RoomId::new(1),
            SuppliedUser {
                id: Some("u1".to_string()),
                name: Some("Alice".to_string()),
            },
        )
        .await;
        rx
    }

    #[tokio::test]
    async fn test_update_status_stores_normalized_and_echoes_raw() {
        // テスト項目: 大文字混じりの status は正規化して保存され、
        //             エコー値は生の文字列のまま返る
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let _rx = join(&hub, "c1").await;

        // when (操作):
        let result = usecase
            .execute(&conn("c1"), Some("FOCUSING".to_string()))
            .await;

        // then (期待する結果):
        let change = result.unwrap();
        assert_eq!(change.room_id, RoomId::new(1));
        assert_eq!(change.user_id.as_str(), "u1");
        assert_eq!(change.echo_status, "FOCUSING");
        assert_eq!(change.stored, PresenceStatus::Focusing);

        // roster には正規化済みの値が載る
        let snapshot = hub.snapshot(RoomId::new(1)).await;
        assert_eq!(snapshot.members[0].status, PresenceStatus::Focusing);
    }

    #[tokio::test]
    async fn test_update_status_missing_defaults_to_idle() {
        // テスト項目: status 欠損はエコー・保存ともに idle になる
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let _rx = join(&hub, "c1").await;

        // when (操作):
        let result = usecase.execute(&conn("c1"), None).await;

        // then (期待する結果):
        let change = result.unwrap();
        assert_eq!(change.echo_status, "idle");
        assert_eq!(change.stored, PresenceStatus::Idle);
    }

    #[tokio::test]
    async fn test_update_status_unknown_string_normalizes_to_idle() {
        // テスト項目: 未知のステータス文字列は idle として保存される
        // given (前提条件):
        let (usecase, hub) = create_test_usecase();
        let _rx = join(&hub, "c1").await;
        usecase
            .execute(&conn("c1"), Some("focusing".to_string()))
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(&conn("c1"), Some("sleeping".to_string()))
            .await;

        // then (期待する結果):
        let change = result.unwrap();
        assert_eq!(change.echo_status, "sleeping");
        assert_eq!(change.stored, PresenceStatus::Idle);
        let snapshot = hub.snapshot(RoomId::new(1)).await;
        assert_eq!(snapshot.members[0].status, PresenceStatus::Idle);
    }

    #[tokio::test]
    async fn test_update_status_not_joined_fails() {
        // テスト項目: 未参加の接続のステータス更新は "not joined" で拒否される
        // given (前提条件):
        let (usecase, _hub) = create_test_usecase();

        // when (操作):
        let result = usecase
            .execute(&conn("ghost"), Some("focusing".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(TimerStatusError::NotJoined));
    }
}
