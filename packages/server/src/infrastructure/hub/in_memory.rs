//! InMemory RealtimeHub 実装
//!
//! ドメイン層が定義する RealtimeHub trait の具体的な実装。
//! プロセス内の HashMap ベースの状態のみを持ち、永続化は行いません
//! （プロセス再起動で presence は消えます。永続エンティティはこのコアの
//! 外側にあります）。
//!
//! ## ロック方針
//!
//! [`PresenceBoard`]（セッション索引・メンバー・接続集合）と接続ごとの
//! sender マップを単一の `Mutex` で包みます。ルーム単位に分割しては
//! いけません: join / leave / broadcast の掃除はルームの接続集合と
//! メンバーマップを同時に更新するため、部分的にしか見えない状態を許すと
//! 接続数が負になったり接続が古いルームに残ったりします。
//! クリティカルセクション内の I/O は unbounded channel への send のみで、
//! ブロックしません。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use studyroom_shared::time::{Clock, SystemClock};

use crate::domain::{
    ConnectionId, DisplayName, NotJoinedError, PresenceBoard, PresenceStatus, PusherChannel,
    RealtimeHub, RoomId, RoomMembersSnapshot, RoomUser, SuppliedUser, Timestamp, UserId,
    UserIdFactory,
};

struct HubState {
    board: PresenceBoard,
    /// 接続ごとの送信チャンネル。board と同じロックの下で更新される。
    senders: HashMap<ConnectionId, PusherChannel>,
}

/// インメモリ RealtimeHub 実装
///
/// presence 状態と接続チャンネルを保持し、ドメイン層の RealtimeHub trait を
/// 実装します（依存性の逆転）。
pub struct InMemoryRealtimeHub {
    state: Mutex<HubState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRealtimeHub {
    /// 新しい InMemoryRealtimeHub を作成（システムクロック使用）
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// クロックを差し替えて作成（テスト用）
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(HubState {
                board: PresenceBoard::new(),
                senders: HashMap::new(),
            }),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// board と sender マップの両方から接続を外す。
    /// ロックを保持したまま呼ぶこと。
    fn drop_connection(
        state: &mut HubState,
        connection_id: &ConnectionId,
        now: Timestamp,
    ) -> Option<RoomId> {
        state.senders.remove(connection_id);
        state
            .board
            .unbind(connection_id, now)
            .map(|binding| binding.room_id)
    }
}

impl Default for InMemoryRealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimeHub for InMemoryRealtimeHub {
    async fn join(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
        room_id: RoomId,
        user: SuppliedUser,
    ) -> RoomUser {
        let user_id = match user.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => UserId::new(id).unwrap_or_else(|_| UserIdFactory::generate()),
            None => UserIdFactory::generate(),
        };
        let display_name = DisplayName::resolve(user.name);

        let now = self.now();
        let mut state = self.state.lock().await;
        state.board.bind(
            connection_id.clone(),
            room_id,
            user_id.clone(),
            display_name.clone(),
            now,
        );
        state.senders.insert(connection_id.clone(), sender);

        tracing::debug!(
            "Connection '{}' joined room {} as user '{}'",
            connection_id,
            room_id,
            user_id
        );

        RoomUser {
            id: user_id,
            name: display_name,
        }
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let now = self.now();
        let mut state = self.state.lock().await;
        let room_id = Self::drop_connection(&mut state, connection_id, now);
        if let Some(room_id) = room_id {
            tracing::debug!("Connection '{}' left room {}", connection_id, room_id);
        }
        room_id
    }

    async fn joined_room(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let state = self.state.lock().await;
        state.board.room_of(connection_id)
    }

    async fn joined_user(&self, connection_id: &ConnectionId) -> Option<RoomUser> {
        let state = self.state.lock().await;
        state
            .board
            .user_of(connection_id)
            .map(|(id, name)| RoomUser { id, name })
    }

    async fn update_status(
        &self,
        connection_id: &ConnectionId,
        raw_status: Option<&str>,
    ) -> Result<PresenceStatus, NotJoinedError> {
        let status = PresenceStatus::normalize(raw_status);
        let now = self.now();
        let mut state = self.state.lock().await;
        state.board.set_status(connection_id, status, now)?;
        Ok(status)
    }

    async fn broadcast_to_room(&self, room_id: RoomId, message: &str) {
        let now = self.now();
        let mut state = self.state.lock().await;

        let targets = state.board.connections(room_id);
        if targets.is_empty() {
            return;
        }

        // 走査中は削除しない: 死んだ接続は記録だけして、全接続への
        // 送信が終わってからまとめて掃除する
        let mut dead: Vec<ConnectionId> = Vec::new();
        for connection_id in targets {
            match state.senders.get(&connection_id) {
                Some(sender) if !sender.is_closed() => {
                    if sender.send(message.to_string()).is_err() {
                        dead.push(connection_id);
                    }
                }
                _ => dead.push(connection_id),
            }
        }

        for connection_id in &dead {
            Self::drop_connection(&mut state, connection_id, now);
            tracing::debug!(
                "Pruned dead connection '{}' from room {} during broadcast",
                connection_id,
                room_id
            );
        }
    }

    async fn snapshot(&self, room_id: RoomId) -> RoomMembersSnapshot {
        let state = self.state.lock().await;
        state.board.snapshot(room_id)
    }
}
