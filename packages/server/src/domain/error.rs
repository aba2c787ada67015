//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// DisplayName validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ChatContent validation error
    #[error("ChatContent cannot be empty")]
    ChatContentEmpty,

    /// ChatContent too long error
    #[error("ChatContent cannot exceed {max} characters (got {actual})")]
    ChatContentTooLong { max: usize, actual: usize },
}

/// Error returned when an operation requires a session binding that
/// does not exist (the connection never joined, or already left).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("connection is not joined to any room")]
pub struct NotJoinedError;
