use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::websocket::msg_event_handler::handle_event_message;
use crate::websocket::msg_join_handler::handle_join_message;
use crate::websocket::msg_leave_handler::handle_leave_message;
use crate::websocket::msg_transform_handler::handle_transform_message;

/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    // Unique id for this client, never reused across connections
    let connection_id = Uuid::new_v4().to_string();
    info!("WebSocket connection established with connection_id: {connection_id}");

    // Split the socket into sender and receiver
    let (mut socket_tx, mut socket_rx) = socket.split();

    // Outbox: the hub pushes typed messages here, the writer task puts them
    // on the wire. Keeps all socket writes on one task.
    let (outbox, mut outbox_rx) = mpsc::unbounded_channel::<ServerMessage>();

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = outbox_rx.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize outbound message: {e}");
                    continue;
                }
            };
            if socket_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let read_state = app_state.clone();
    let read_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = socket_rx.next().await {
            let msg = match frame {
                Ok(Message::Text(msg)) => msg,
                Ok(Message::Close(_)) | Err(_) => break,
                // Ping/pong/binary frames carry no protocol traffic
                Ok(_) => continue,
            };

            // Parse the incoming message as JSON; malformed traffic is
            // dropped, never fatal for the connection.
            let parsed: ClientMessage = match serde_json::from_str(&msg) {
                Ok(parsed) => parsed,
                Err(e) => {
                    error!("Failed to parse message from {read_connection_id}: {e}");
                    continue;
                }
            };

            match parsed {
                ClientMessage::JoinWorkshop(join_msg) => {
                    handle_join_message(&join_msg, &read_connection_id, &outbox, &read_state)
                        .await;
                }
                ClientMessage::LeaveWorkshop(leave_msg) => {
                    handle_leave_message(&leave_msg, &read_connection_id, &read_state).await;
                }
                ClientMessage::UpdateTransform(transform_msg) => {
                    handle_transform_message(&transform_msg, &read_connection_id, &read_state)
                        .await;
                }
                ClientMessage::SyncEvent(event_msg) => {
                    handle_event_message(event_msg, &read_connection_id, &read_state).await;
                }
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Unconditional cleanup: abrupt closure behaves exactly like an
    // explicit leave for every room this connection was in.
    let retired = app_state.hub.disconnect(&connection_id).await;
    app_state.retire_workshops(&retired).await;
    info!("WebSocket connection {connection_id} terminated");
}
