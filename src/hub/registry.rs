use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;

use crate::models::{Identity, ParticipantSnapshot, ServerMessage, Transform};

/// Handle for pushing outbound messages to one connection's writer task.
pub type Outbox = UnboundedSender<ServerMessage>;

/// One connected client currently joined to a workshop. Owned exclusively by
/// the registry; mutated only through registry operations.
#[derive(Debug)]
pub struct Participant {
    pub identity: Identity,
    pub transform: Transform,
    pub joined_at: DateTime<Utc>,
    pub outbox: Outbox,
}

impl Participant {
    pub fn snapshot(&self, connection_id: &str) -> ParticipantSnapshot {
        ParticipantSnapshot {
            connection_id: connection_id.to_string(),
            identity: self.identity.clone(),
            transform: self.transform,
        }
    }
}

/// Participants of one workshop, keyed by connection id. Room membership IS
/// this key set — participants carry their own outbox, so presence and
/// broadcast reach cannot diverge.
pub type Room = HashMap<String, Participant>;

/// Authoritative in-memory map from workshop id to its participants.
/// A room entry exists iff it has at least one participant; the entry is
/// dropped the instant the last participant leaves.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    rooms: HashMap<String, Room>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection in a workshop and return the snapshot of the
    /// *other* participants present at this instant, so the joiner can
    /// render existing avatars without waiting for individual join events.
    ///
    /// Idempotent per connection: re-joining the same workshop overwrites
    /// the stored identity and transform but keeps `joined_at` and never
    /// duplicates the membership entry.
    pub fn join(
        &mut self,
        workshop_id: &str,
        connection_id: &str,
        identity: Identity,
        outbox: Outbox,
    ) -> Vec<ParticipantSnapshot> {
        let room = self.rooms.entry(workshop_id.to_string()).or_default();

        let others: Vec<ParticipantSnapshot> = room
            .iter()
            .filter(|(id, _)| id.as_str() != connection_id)
            .map(|(id, p)| p.snapshot(id))
            .collect();

        let joined_at = room
            .get(connection_id)
            .map(|existing| existing.joined_at)
            .unwrap_or_else(Utc::now);

        room.insert(
            connection_id.to_string(),
            Participant {
                identity,
                transform: Transform::default(),
                joined_at,
                outbox,
            },
        );

        others
    }

    /// Remove a connection from a workshop. Returns `false` when it was not
    /// a tracked participant. Deletes the room entry when it empties.
    pub fn leave(&mut self, workshop_id: &str, connection_id: &str) -> bool {
        let Some(room) = self.rooms.get_mut(workshop_id) else {
            return false;
        };
        let removed = room.remove(connection_id).is_some();
        if room.is_empty() {
            self.rooms.remove(workshop_id);
        }
        removed
    }

    /// Last-write-wins wholesale overwrite of a participant's transform.
    /// Returns `false` (silent no-op) when the connection is not a tracked
    /// participant of that workshop, which tolerates updates racing a leave.
    pub fn update_transform(
        &mut self,
        workshop_id: &str,
        connection_id: &str,
        transform: Transform,
    ) -> bool {
        match self
            .rooms
            .get_mut(workshop_id)
            .and_then(|room| room.get_mut(connection_id))
        {
            Some(participant) => {
                participant.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Sweep a connection out of every room it belongs to and return the
    /// affected workshop ids. Idempotent and safe for connections that never
    /// joined anything. The single-room invariant should limit this to one
    /// room, but cleanup runs across all of them regardless.
    pub fn remove_connection(&mut self, connection_id: &str) -> Vec<String> {
        let affected: Vec<String> = self
            .rooms
            .iter()
            .filter(|(_, room)| room.contains_key(connection_id))
            .map(|(id, _)| id.clone())
            .collect();
        for workshop_id in &affected {
            self.leave(workshop_id, connection_id);
        }
        affected
    }

    /// Workshop ids the connection currently occupies.
    pub fn rooms_of(&self, connection_id: &str) -> Vec<String> {
        self.rooms
            .iter()
            .filter(|(_, room)| room.contains_key(connection_id))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn is_member(&self, workshop_id: &str, connection_id: &str) -> bool {
        self.rooms
            .get(workshop_id)
            .is_some_and(|room| room.contains_key(connection_id))
    }

    pub fn room(&self, workshop_id: &str) -> Option<&Room> {
        self.rooms.get(workshop_id)
    }

    pub fn participant_count(&self, workshop_id: &str) -> usize {
        self.rooms.get(workshop_id).map_or(0, Room::len)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Distinct live connections across all rooms.
    pub fn connection_count(&self) -> usize {
        self.rooms
            .values()
            .flat_map(|room| room.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    /// (workshop id, participant count) for every live room.
    pub fn active_rooms(&self) -> Vec<(String, usize)> {
        self.rooms
            .iter()
            .map(|(id, room)| (id.clone(), room.len()))
            .collect()
    }
}
