//! UseCase layer error definitions.
//!
//! Display 文字列はそのままクライアントへ返す `error` エンベロープの
//! `message` になるため、変更はワイヤ互換性に影響します。

use thiserror::Error;

/// Errors of the join operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// join payload did not carry a room id; rejected before any mutation
    #[error("roomId is required")]
    RoomIdRequired,
}

/// Errors of the chat operation, in validation order
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Sender holds no session binding
    #[error("not joined")]
    NotJoined,

    /// Trimmed content is empty
    #[error("content is empty")]
    ContentEmpty,

    /// Trimmed content exceeds the character limit
    #[error("content too long")]
    ContentTooLong,

    /// Payload roomId differs from the bound room
    #[error("roomId mismatch")]
    RoomIdMismatch,
}

/// Errors of the timer status operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerStatusError {
    /// Sender holds no session binding
    #[error("not joined")]
    NotJoined,
}
