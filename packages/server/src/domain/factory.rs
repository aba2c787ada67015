//! Domain factories for creating identifiers.
//!
//! Generation is separated from the validation logic in the value objects.
//! None of the generated ids need cryptographic strength; UUID v4 is used
//! for uniqueness only.

use super::value_object::{ConnectionId, UserId};

/// Factory for generating UserId instances.
///
/// Used when a joining client supplies no user id (anonymous participants).
pub struct UserIdFactory;

impl UserIdFactory {
    /// Generate a new UserId with a random UUID v4.
    pub fn generate() -> UserId {
        UserId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating ConnectionId instances.
///
/// Every accepted socket gets one; it stays stable for the socket's lifetime.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating chat message ids.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new message id with a random UUID v4.
    pub fn generate() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_factory_generate() {
        // テスト項目: UserIdFactory::generate() で UUID v4 形式の UserId を生成できる
        // when (操作):
        let user_id = UserIdFactory::generate();

        // then (期待する結果):
        assert_eq!(user_id.as_str().len(), 36); // UUID v4 の標準長（ハイフン含む）
    }

    #[test]
    fn test_user_id_factory_generate_uniqueness() {
        // テスト項目: UserIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let user_id1 = UserIdFactory::generate();
        let user_id2 = UserIdFactory::generate();

        // then (期待する結果):
        assert_ne!(user_id1, user_id2);
    }

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // テスト項目: ConnectionIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let connection_id1 = ConnectionIdFactory::generate();
        let connection_id2 = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(connection_id1, connection_id2);
    }

    #[test]
    fn test_message_id_factory_generate_uniqueness() {
        // テスト項目: MessageIdFactory::generate() は毎回異なる ID を生成する
        // when (操作):
        let id1 = MessageIdFactory::generate();
        let id2 = MessageIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }
}
