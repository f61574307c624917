use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Identity, Transform};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JoinWorkshopMessage {
    pub workshop_id: String,
    pub user: Identity,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeaveWorkshopMessage {
    pub workshop_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransformMessage {
    pub workshop_id: String,
    pub transform: Transform,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SyncEventMessage {
    pub workshop_id: String,
    /// Application-level event name ("hotspot-activated", ...). Rides as
    /// `event` because the envelope tag already owns `type`.
    #[serde(rename = "event")]
    pub event_type: String,
    pub data: Value,
}

/// Messages a client sends to the hub.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "join-workshop")]
    JoinWorkshop(JoinWorkshopMessage),
    #[serde(rename = "leave-workshop")]
    LeaveWorkshop(LeaveWorkshopMessage),
    #[serde(rename = "update-transform")]
    UpdateTransform(UpdateTransformMessage),
    #[serde(rename = "sync-event", alias = "workshop-event")]
    SyncEvent(SyncEventMessage),
}

/// One participant as seen by a freshly joined client.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSnapshot {
    pub connection_id: String,
    pub identity: Identity,
    pub transform: Transform,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentParticipantsMessage {
    pub participants: Vec<ParticipantSnapshot>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserJoinedMessage {
    pub connection_id: String,
    pub user: Identity,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserLeftMessage {
    pub connection_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantMovedMessage {
    pub connection_id: String,
    pub transform: Transform,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopEventMessage {
    #[serde(rename = "event")]
    pub event_type: String,
    pub data: Value,
    pub sender: String,
}

/// Messages the hub sends to clients.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "current-participants")]
    CurrentParticipants(CurrentParticipantsMessage),
    #[serde(rename = "user-joined")]
    UserJoined(UserJoinedMessage),
    #[serde(rename = "user-left")]
    UserLeft(UserLeftMessage),
    #[serde(rename = "participant-moved")]
    ParticipantMoved(ParticipantMovedMessage),
    #[serde(rename = "workshop-event")]
    WorkshopEvent(WorkshopEventMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_message_tags() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"join-workshop","workshopId":"w1","user":{"id":"u1","username":"ada","role":"student"}}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::JoinWorkshop(join) => {
                assert_eq!(join.workshop_id, "w1");
                assert_eq!(join.user.username, "ada");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn sync_event_accepts_workshop_event_alias() {
        for tag in ["sync-event", "workshop-event"] {
            let raw = format!(
                r#"{{"type":"{tag}","workshopId":"w1","event":"hotspot-activated","data":{{"id":"hs1"}}}}"#
            );
            let msg: ClientMessage = serde_json::from_str(&raw).unwrap();
            match msg {
                ClientMessage::SyncEvent(ev) => {
                    assert_eq!(ev.event_type, "hotspot-activated");
                    assert_eq!(ev.data["id"], "hs1");
                }
                other => panic!("unexpected message: {other:?}"),
            }
        }
    }

    #[test]
    fn server_message_wire_shape() {
        let msg = ServerMessage::UserLeft(UserLeftMessage {
            connection_id: "c1".to_string(),
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "user-left");
        assert_eq!(json["connectionId"], "c1");
    }
}
