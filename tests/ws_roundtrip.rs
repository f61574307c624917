//! End-to-end flow over real WebSockets: two clients join a workshop, one
//! moves and fires an event, then disconnects abruptly.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;

use workshop_live::client::WorkshopClient;
use workshop_live::models::{Identity, Pose, ServerMessage, Transform, Vec3};
use workshop_live::state::AppState;

async fn spawn_server() -> (String, Arc<AppState>) {
    let app_state = Arc::new(AppState::new());
    let app = workshop_live::build_app(app_state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("ws://{addr}/ws"), app_state)
}

async fn expect_message(client: &mut WorkshopClient) -> ServerMessage {
    timeout(Duration::from_secs(5), client.next_message())
        .await
        .expect("timed out waiting for a message")
        .expect("connection closed unexpectedly")
        .expect("protocol error")
}

fn identity(name: &str) -> Identity {
    Identity {
        id: format!("user-{name}"),
        username: name.to_string(),
        role: "student".to_string(),
    }
}

#[tokio::test]
async fn full_session_roundtrip() {
    let (url, app_state) = spawn_server().await;

    let mut ada = WorkshopClient::connect(&url).await.unwrap();
    ada.join("w1", identity("ada")).await.unwrap();
    match expect_message(&mut ada).await {
        ServerMessage::CurrentParticipants(msg) => assert!(msg.participants.is_empty()),
        other => panic!("expected empty current-participants, got {other:?}"),
    }

    let mut bob = WorkshopClient::connect(&url).await.unwrap();
    bob.join("w1", identity("bob")).await.unwrap();

    // Bob snapshots the room as it was; connection ids are server-assigned.
    let ada_conn = match expect_message(&mut bob).await {
        ServerMessage::CurrentParticipants(msg) => {
            assert_eq!(msg.participants.len(), 1);
            assert_eq!(msg.participants[0].identity.username, "ada");
            msg.participants[0].connection_id.clone()
        }
        other => panic!("expected current-participants, got {other:?}"),
    };

    match expect_message(&mut ada).await {
        ServerMessage::UserJoined(msg) => assert_eq!(msg.user.username, "bob"),
        other => panic!("expected user-joined, got {other:?}"),
    }

    ada.send_transform(
        "w1",
        Transform {
            head: Pose {
                position: Vec3 { x: 1.0, y: 1.6, z: 0.0 },
                rotation: None,
            },
            left_hand: None,
            right_hand: None,
        },
    )
    .await
    .unwrap();

    match expect_message(&mut bob).await {
        ServerMessage::ParticipantMoved(msg) => {
            assert_eq!(msg.connection_id, ada_conn);
            assert_eq!(msg.transform.head.position, Vec3 { x: 1.0, y: 1.6, z: 0.0 });
        }
        other => panic!("expected participant-moved, got {other:?}"),
    }

    ada.send_event("w1", "hotspot-activated", json!({"id": "hs1"}))
        .await
        .unwrap();

    match expect_message(&mut bob).await {
        ServerMessage::WorkshopEvent(msg) => {
            assert_eq!(msg.event_type, "hotspot-activated");
            assert_eq!(msg.data, json!({"id": "hs1"}));
            assert_eq!(msg.sender, ada_conn);
        }
        other => panic!("expected workshop-event, got {other:?}"),
    }

    // Abrupt closure, no leave-workshop message: the hub must clean up and
    // tell the room.
    ada.close().await.unwrap();
    match expect_message(&mut bob).await {
        ServerMessage::UserLeft(msg) => assert_eq!(msg.connection_id, ada_conn),
        other => panic!("expected user-left, got {other:?}"),
    }
    assert_eq!(app_state.hub.participant_count("w1").await, 1);
}
