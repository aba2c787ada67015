//! Conversion logic between DTOs and domain models.

use crate::domain::{RoomMember, RoomMembersSnapshot, RoomUser};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Model → DTO
// ========================================

impl From<RoomUser> for dto::WsUserDto {
    fn from(user: RoomUser) -> Self {
        Self {
            id: user.id.into_string(),
            name: user.name.into_string(),
        }
    }
}

impl From<RoomMember> for dto::MemberDto {
    fn from(member: RoomMember) -> Self {
        Self {
            id: member.id.into_string(),
            name: member.name.into_string(),
            status: member.status,
        }
    }
}

impl From<RoomMembersSnapshot> for dto::RoomMembersUpdatePayload {
    fn from(snapshot: RoomMembersSnapshot) -> Self {
        let count = snapshot.count();
        Self {
            room_id: snapshot.room_id.value(),
            members: snapshot.members.into_iter().map(Into::into).collect(),
            count,
        }
    }
}

impl From<RoomMembersSnapshot> for http::RoomPresenceDto {
    fn from(snapshot: RoomMembersSnapshot) -> Self {
        let count = snapshot.count();
        Self {
            room_id: snapshot.room_id.value(),
            members: snapshot.members.into_iter().map(Into::into).collect(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, PresenceStatus, RoomId, UserId};

    fn member(id: &str, name: &str, status: PresenceStatus) -> RoomMember {
        RoomMember {
            id: UserId::new(id.to_string()).unwrap(),
            name: DisplayName::new(name.to_string()).unwrap(),
            status,
        }
    }

    #[test]
    fn test_room_user_to_dto() {
        // テスト項目: RoomUser が WsUserDto に変換される
        // given (前提条件):
        let user = RoomUser {
            id: UserId::new("u1".to_string()).unwrap(),
            name: DisplayName::new("Alice".to_string()).unwrap(),
        };

        // when (操作):
        let dto: dto::WsUserDto = user.into();

        // then (期待する結果):
        assert_eq!(dto.id, "u1");
        assert_eq!(dto.name, "Alice");
    }

    #[test]
    fn test_snapshot_to_members_update_payload() {
        // テスト項目: スナップショットが roomMembersUpdate の payload に変換され、
        //             count がメンバー数と一致する
        // given (前提条件):
        let snapshot = RoomMembersSnapshot {
            room_id: RoomId::new(1),
            members: vec![
                member("u1", "Alice", PresenceStatus::Focusing),
                member("u2", "Bob", PresenceStatus::Idle),
            ],
        };

        // when (操作):
        let payload: dto::RoomMembersUpdatePayload = snapshot.into();

        // then (期待する結果):
        assert_eq!(payload.room_id, 1);
        assert_eq!(payload.count, 2);
        assert_eq!(payload.members.len(), 2);
        assert_eq!(payload.members[0].id, "u1");
        assert_eq!(payload.members[0].status, PresenceStatus::Focusing);
    }

    #[test]
    fn test_snapshot_to_room_presence_dto() {
        // テスト項目: スナップショットが HTTP の RoomPresenceDto に変換される
        // given (前提条件):
        let snapshot = RoomMembersSnapshot {
            room_id: RoomId::new(7),
            members: vec![member("u1", "Alice", PresenceStatus::Idle)],
        };

        // when (操作):
        let dto: http::RoomPresenceDto = snapshot.into();

        // then (期待する結果):
        assert_eq!(dto.room_id, 7);
        assert_eq!(dto.count, 1);
        assert_eq!(dto.members[0].name, "Alice");
    }
}
