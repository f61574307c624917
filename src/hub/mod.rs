pub mod broadcaster;
pub mod registry;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::{
    CurrentParticipantsMessage, Identity, ParticipantMovedMessage, ServerMessage, Transform,
    UserJoinedMessage, UserLeftMessage, WorkshopEventMessage,
};
use registry::{Outbox, SessionRegistry};

/// The session hub: presence, transform relay and event relay for every
/// live workshop in this process.
///
/// One mutex guards the registry (and with it room membership, since the
/// two are the same structure), and each operation runs start to finish
/// inside one guard scope. That restores the single-thread serialization
/// the protocol assumes: no two handlers for the same room ever interleave,
/// and there is no partial-failure path between registering a participant
/// and making it reachable for broadcasts. Outbound delivery is a
/// non-blocking push into each recipient's writer task, so nothing awaits
/// while the lock is held.
#[derive(Debug, Default)]
pub struct Hub {
    registry: Mutex<SessionRegistry>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join a connection to a workshop.
    ///
    /// A connection belongs to at most one room: joining while still in a
    /// different workshop first runs the same removal path as a disconnect
    /// for that room, `user-left` broadcast included. The caller then gets
    /// the `current-participants` snapshot on its outbox and the rest of
    /// the room is told `user-joined` — unless this was an idempotent
    /// re-join of the same workshop, in which case only the snapshot is
    /// re-sent.
    ///
    /// Returns the ids of workshops whose rooms retired as a side effect of
    /// the implicit leave.
    pub async fn join(
        &self,
        workshop_id: &str,
        connection_id: &str,
        identity: Identity,
        outbox: Outbox,
    ) -> Vec<String> {
        let mut registry = self.registry.lock().await;

        let mut retired = Vec::new();
        for previous in registry.rooms_of(connection_id) {
            if previous == workshop_id {
                continue;
            }
            info!(
                "Connection {connection_id} joining {workshop_id} while in {previous}, leaving it first"
            );
            registry.leave(&previous, connection_id);
            match registry.room(&previous) {
                Some(room) => broadcaster::broadcast(
                    room,
                    &ServerMessage::UserLeft(UserLeftMessage {
                        connection_id: connection_id.to_string(),
                    }),
                    None,
                ),
                None => retired.push(previous),
            }
        }

        let rejoin = registry.is_member(workshop_id, connection_id);
        let others = registry.join(workshop_id, connection_id, identity.clone(), outbox.clone());
        info!(
            "Connection {connection_id} ({}) joined workshop {workshop_id}, {} other participant(s)",
            identity.username,
            others.len()
        );

        let _ = outbox.send(ServerMessage::CurrentParticipants(
            CurrentParticipantsMessage {
                participants: others,
            },
        ));

        if !rejoin {
            if let Some(room) = registry.room(workshop_id) {
                broadcaster::broadcast(
                    room,
                    &ServerMessage::UserJoined(UserJoinedMessage {
                        connection_id: connection_id.to_string(),
                        user: identity,
                    }),
                    Some(connection_id),
                );
            }
        }

        retired
    }

    /// Explicit leave: remove-then-notify, atomically with respect to the
    /// registry. Returns `true` when the room retired with this leave.
    /// Leaving a workshop the connection never joined is a silent no-op.
    pub async fn leave(&self, workshop_id: &str, connection_id: &str) -> bool {
        let mut registry = self.registry.lock().await;
        if !registry.leave(workshop_id, connection_id) {
            return false;
        }
        info!("Connection {connection_id} left workshop {workshop_id}");

        match registry.room(workshop_id) {
            Some(room) => {
                broadcaster::broadcast(
                    room,
                    &ServerMessage::UserLeft(UserLeftMessage {
                        connection_id: connection_id.to_string(),
                    }),
                    None,
                );
                false
            }
            None => {
                info!("Workshop {workshop_id} retired, last participant left");
                true
            }
        }
    }

    /// Apply a pose update (last-write-wins) and rebroadcast it to every
    /// other participant. Updates arriving after the sender already left
    /// the room are dropped silently — an expected race, not a fault.
    pub async fn update_transform(
        &self,
        workshop_id: &str,
        connection_id: &str,
        transform: Transform,
    ) {
        let mut registry = self.registry.lock().await;
        if !registry.update_transform(workshop_id, connection_id, transform) {
            debug!(
                "Dropping transform from {connection_id} for {workshop_id}: not a participant"
            );
            return;
        }
        if let Some(room) = registry.room(workshop_id) {
            broadcaster::broadcast(
                room,
                &ServerMessage::ParticipantMoved(ParticipantMovedMessage {
                    connection_id: connection_id.to_string(),
                    transform,
                }),
                Some(connection_id),
            );
        }
    }

    /// Content-agnostic room-scoped pub/sub: mirror an application event to
    /// every other participant, verbatim. The hub never interprets `data`.
    pub async fn relay_event(
        &self,
        workshop_id: &str,
        connection_id: &str,
        event_type: String,
        data: Value,
    ) {
        let registry = self.registry.lock().await;
        if !registry.is_member(workshop_id, connection_id) {
            debug!("Dropping event from {connection_id} for {workshop_id}: not a participant");
            return;
        }
        if let Some(room) = registry.room(workshop_id) {
            debug!("Relaying event '{event_type}' from {connection_id} in {workshop_id}");
            broadcaster::broadcast(
                room,
                &ServerMessage::WorkshopEvent(WorkshopEventMessage {
                    event_type,
                    data,
                    sender: connection_id.to_string(),
                }),
                Some(connection_id),
            );
        }
    }

    /// Transport-level closure: identical effect to an explicit leave, for
    /// every room the connection belonged to. Unconditional and idempotent;
    /// a second call for the same connection does nothing and broadcasts
    /// nothing. Returns the ids of workshops whose rooms retired.
    pub async fn disconnect(&self, connection_id: &str) -> Vec<String> {
        let mut registry = self.registry.lock().await;
        let affected = registry.remove_connection(connection_id);
        if affected.is_empty() {
            return Vec::new();
        }
        info!(
            "Connection {connection_id} disconnected, cleaned up from {} workshop(s)",
            affected.len()
        );

        let mut retired = Vec::new();
        for workshop_id in affected {
            match registry.room(&workshop_id) {
                Some(room) => broadcaster::broadcast(
                    room,
                    &ServerMessage::UserLeft(UserLeftMessage {
                        connection_id: connection_id.to_string(),
                    }),
                    None,
                ),
                None => retired.push(workshop_id),
            }
        }
        retired
    }

    // Query surface. External readers observe membership through these,
    // never by reaching into the registry.

    pub async fn participant_count(&self, workshop_id: &str) -> usize {
        self.registry.lock().await.participant_count(workshop_id)
    }

    pub async fn room_count(&self) -> usize {
        self.registry.lock().await.room_count()
    }

    pub async fn connection_count(&self) -> usize {
        self.registry.lock().await.connection_count()
    }

    pub async fn active_rooms(&self) -> Vec<(String, usize)> {
        self.registry.lock().await.active_rooms()
    }
}
