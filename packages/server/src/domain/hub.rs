//! RealtimeHub trait 定義
//!
//! ドメイン層が必要とするリアルタイム調整（presence 管理とブロードキャスト）の
//! インターフェースを定義します。具体的な実装は Infrastructure 層が提供します
//! （依存性の逆転）。
//!
//! ## 設計ノート
//!
//! presence の状態（セッション索引・ルーム別メンバー・ルーム別接続集合）と
//! 接続ごとの送信チャンネルは、仕様上ひとつのクリティカルセクションで
//! 同時に更新する必要があります（join / leave / broadcast の掃除が
//! 横断的に両方に触れるため）。そのためこの trait は両方の責務を持ち、
//! 実装側が単一のロックで守ります。seam を二つに分けると、接続数が負に
//! なったり接続が古いルームに残ったりするレースが再発します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    entity::RoomMembersSnapshot,
    error::NotJoinedError,
    value_object::{ConnectionId, DisplayName, PresenceStatus, RoomId, UserId},
};

/// Per-connection outbound channel. The websocket handler drains the
/// receiving half and writes to the socket; sends never block.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Identity a connection is bound as, resolved at join time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomUser {
    pub id: UserId,
    pub name: DisplayName,
}

/// Identity fields a joining client may supply. Blank or missing values
/// are resolved server-side (generated id, anonymous name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppliedUser {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Realtime room coordination hub.
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しない。
#[async_trait]
pub trait RealtimeHub: Send + Sync {
    /// 接続をルームにバインドする。
    ///
    /// 既にバインド済みの接続は暗黙的に leave してから再バインドされる。
    /// 解決済みのユーザー識別子を返す（クライアントへの ack 用）。
    async fn join(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
        room_id: RoomId,
        user: SuppliedUser,
    ) -> RoomUser;

    /// 接続のバインドを解除し、属していたルームを返す。
    ///
    /// 未バインドの接続では何もせず `None` を返す（冪等）。
    async fn leave(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    /// 接続が現在バインドされているルームを取得
    async fn joined_room(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    /// 接続がバインドされているユーザー識別子を取得
    async fn joined_user(&self, connection_id: &ConnectionId) -> Option<RoomUser>;

    /// 接続の背後にいるメンバーのステータスを正規化して保存し、
    /// 保存された値を返す
    async fn update_status(
        &self,
        connection_id: &ConnectionId,
        raw_status: Option<&str>,
    ) -> Result<PresenceStatus, NotJoinedError>;

    /// ルームの全接続へメッセージを送信する。
    ///
    /// 閉じている接続・送信に失敗した接続は走査中には削除せず、
    /// 全接続への送信が終わってから leave 相当の掃除を行う。
    /// 存在しない・空のルームでは何もしない。
    async fn broadcast_to_room(&self, room_id: RoomId, message: &str);

    /// ルームの roster スナップショットを取得
    async fn snapshot(&self, room_id: RoomId) -> RoomMembersSnapshot;
}
