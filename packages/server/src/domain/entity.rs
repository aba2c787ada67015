//! Core domain models for room presence.
//!
//! The [`PresenceBoard`] aggregate owns the session index, the per-room
//! member maps and the per-room connection sets together, so a single
//! caller-side critical section can keep them consistent. Its methods are
//! pure and synchronous; locking and I/O live in the infrastructure layer.

use std::collections::{HashMap, HashSet};

use super::{
    error::NotJoinedError,
    value_object::{ConnectionId, DisplayName, PresenceStatus, RoomId, Timestamp, UserId},
};

/// A logical participant visible in a room's roster.
///
/// One member aggregates every live connection of the same user in the same
/// room (e.g. multiple tabs). A member exists iff `connections > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Logical user identifier
    pub user_id: UserId,
    /// Display name (last joined connection wins)
    pub display_name: DisplayName,
    /// Presence status shown in the roster
    pub status: PresenceStatus,
    /// Number of currently bound connections for this user in this room
    pub connections: usize,
    /// Last join/leave/status activity, Unix milliseconds
    pub last_active_at: Timestamp,
}

impl Member {
    /// Create a new member with no connections yet.
    pub fn new(user_id: UserId, display_name: DisplayName, last_active_at: Timestamp) -> Self {
        Self {
            user_id,
            display_name,
            status: PresenceStatus::Idle,
            connections: 0,
            last_active_at,
        }
    }
}

/// The room/user binding of one live connection.
///
/// Created on join, destroyed on leave or disconnect. A connection holds at
/// most one binding at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBinding {
    pub connection_id: ConnectionId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub display_name: DisplayName,
}

/// One member entry of a roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    pub id: UserId,
    pub name: DisplayName,
    pub status: PresenceStatus,
}

/// A stable view of a room's roster at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMembersSnapshot {
    pub room_id: RoomId,
    pub members: Vec<RoomMember>,
}

impl RoomMembersSnapshot {
    /// Number of online members (logical users, not connections).
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Presence state across all rooms.
///
/// Invariants maintained by the mutating methods:
/// - a connection has at most one [`SessionBinding`];
/// - `member.connections` equals the number of bound connections with that
///   `(room, user)` pair and never goes negative;
/// - a room appears in the member map / connection map iff it has at least
///   one member / connection.
#[derive(Debug, Default)]
pub struct PresenceBoard {
    /// Reverse lookup: connection -> current binding
    sessions: HashMap<ConnectionId, SessionBinding>,
    /// Roster per room: user -> member state
    members_by_room: HashMap<RoomId, HashMap<UserId, Member>>,
    /// Live connections per room, used only for fan-out
    connections_by_room: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl PresenceBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a connection to a room as the given user.
    ///
    /// If the connection is already bound (same or another room) it is
    /// unbound first, so re-joining never produces a second binding.
    pub fn bind(
        &mut self,
        connection_id: ConnectionId,
        room_id: RoomId,
        user_id: UserId,
        display_name: DisplayName,
        now: Timestamp,
    ) {
        self.unbind(&connection_id, now);

        self.sessions.insert(
            connection_id.clone(),
            SessionBinding {
                connection_id: connection_id.clone(),
                room_id,
                user_id: user_id.clone(),
                display_name: display_name.clone(),
            },
        );

        self.connections_by_room
            .entry(room_id)
            .or_default()
            .insert(connection_id);

        let member = self
            .members_by_room
            .entry(room_id)
            .or_default()
            .entry(user_id.clone())
            .or_insert_with(|| Member::new(user_id, display_name.clone(), now));
        // last joined connection wins the display name
        member.display_name = display_name;
        member.connections += 1;
        member.last_active_at = now;
    }

    /// Unbind a connection, returning the binding it held.
    ///
    /// No-op (returns `None`) when the connection is not bound. Decrements
    /// the member's connection count, removes the member when it reaches
    /// zero, and drops empty room entries.
    pub fn unbind(&mut self, connection_id: &ConnectionId, now: Timestamp) -> Option<SessionBinding> {
        let binding = self.sessions.remove(connection_id)?;

        if let Some(connections) = self.connections_by_room.get_mut(&binding.room_id) {
            connections.remove(connection_id);
            if connections.is_empty() {
                self.connections_by_room.remove(&binding.room_id);
            }
        }

        if let Some(members) = self.members_by_room.get_mut(&binding.room_id) {
            if let Some(member) = members.get_mut(&binding.user_id) {
                member.connections = member.connections.saturating_sub(1);
                member.last_active_at = now;
                if member.connections == 0 {
                    members.remove(&binding.user_id);
                }
            }
            if members.is_empty() {
                self.members_by_room.remove(&binding.room_id);
            }
        }

        Some(binding)
    }

    /// Room the connection is currently bound to, if any.
    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        self.sessions.get(connection_id).map(|b| b.room_id)
    }

    /// User identity the connection is currently bound as, if any.
    pub fn user_of(&self, connection_id: &ConnectionId) -> Option<(UserId, DisplayName)> {
        self.sessions
            .get(connection_id)
            .map(|b| (b.user_id.clone(), b.display_name.clone()))
    }

    /// Update the presence status of the member behind a connection.
    ///
    /// # Errors
    ///
    /// Returns [`NotJoinedError`] when the connection is not bound.
    pub fn set_status(
        &mut self,
        connection_id: &ConnectionId,
        status: PresenceStatus,
        now: Timestamp,
    ) -> Result<(), NotJoinedError> {
        let binding = self.sessions.get(connection_id).ok_or(NotJoinedError)?;

        if let Some(member) = self
            .members_by_room
            .get_mut(&binding.room_id)
            .and_then(|members| members.get_mut(&binding.user_id))
        {
            member.status = status;
            member.last_active_at = now;
        }

        Ok(())
    }

    /// Snapshot a room's roster: members with at least one connection,
    /// sorted ascending by display name (stable for equal names).
    ///
    /// An unknown room yields an empty snapshot, not an error.
    pub fn snapshot(&self, room_id: RoomId) -> RoomMembersSnapshot {
        let mut members: Vec<RoomMember> = self
            .members_by_room
            .get(&room_id)
            .map(|members| {
                members
                    .values()
                    .filter(|m| m.connections > 0)
                    .map(|m| RoomMember {
                        id: m.user_id.clone(),
                        name: m.display_name.clone(),
                        status: m.status,
                    })
                    .collect()
            })
            .unwrap_or_default();

        members.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

        RoomMembersSnapshot { room_id, members }
    }

    /// Stable copy of a room's connection set, for one fan-out pass.
    pub fn connections(&self, room_id: RoomId) -> Vec<ConnectionId> {
        self.connections_by_room
            .get(&room_id)
            .map(|connections| connections.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of bound connections for a `(room, user)` pair.
    pub fn connection_count(&self, room_id: RoomId, user_id: &UserId) -> usize {
        self.members_by_room
            .get(&room_id)
            .and_then(|members| members.get(user_id))
            .map(|member| member.connections)
            .unwrap_or(0)
    }
}
