//! Minimal client-side adapter for the workshop wire protocol.
//!
//! Wraps a tokio-tungstenite stream with typed send/receive for the session
//! messages. Used by the end-to-end tests and by headless tooling; the real
//! 3D client implements the same protocol on its own stack.

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

use crate::models::{
    ClientMessage, Identity, JoinWorkshopMessage, LeaveWorkshopMessage, ServerMessage,
    SyncEventMessage, Transform, UpdateTransformMessage,
};

#[derive(Debug)]
pub enum ClientError {
    Transport(tungstenite::Error),
    Protocol(serde_json::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "Transport error: {}", e),
            ClientError::Protocol(e) => write!(f, "Protocol error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<tungstenite::Error> for ClientError {
    fn from(e: tungstenite::Error) -> Self {
        ClientError::Transport(e)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Protocol(e)
    }
}

/// One live connection to the hub.
pub struct WorkshopClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WorkshopClient {
    /// Connect to the hub's `/ws` endpoint (e.g. `ws://127.0.0.1:3000/ws`).
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }

    pub async fn join(&mut self, workshop_id: &str, user: Identity) -> Result<(), ClientError> {
        self.send(&ClientMessage::JoinWorkshop(JoinWorkshopMessage {
            workshop_id: workshop_id.to_string(),
            user,
        }))
        .await
    }

    pub async fn leave(&mut self, workshop_id: &str) -> Result<(), ClientError> {
        self.send(&ClientMessage::LeaveWorkshop(LeaveWorkshopMessage {
            workshop_id: workshop_id.to_string(),
        }))
        .await
    }

    pub async fn send_transform(
        &mut self,
        workshop_id: &str,
        transform: Transform,
    ) -> Result<(), ClientError> {
        self.send(&ClientMessage::UpdateTransform(UpdateTransformMessage {
            workshop_id: workshop_id.to_string(),
            transform,
        }))
        .await
    }

    pub async fn send_event(
        &mut self,
        workshop_id: &str,
        event_type: &str,
        data: Value,
    ) -> Result<(), ClientError> {
        self.send(&ClientMessage::SyncEvent(SyncEventMessage {
            workshop_id: workshop_id.to_string(),
            event_type: event_type.to_string(),
            data,
        }))
        .await
    }

    /// Next hub message, skipping transport-level frames. `None` once the
    /// connection is closed.
    pub async fn next_message(&mut self) -> Option<Result<ServerMessage, ClientError>> {
        while let Some(frame) = self.stream.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => return None,
                Ok(_) => continue,
                Err(e) => return Some(Err(e.into())),
            };
            return Some(serde_json::from_str(text.as_str()).map_err(ClientError::from));
        }
        None
    }

    pub async fn close(mut self) -> Result<(), ClientError> {
        self.stream.close(None).await?;
        Ok(())
    }

    async fn send(&mut self, message: &ClientMessage) -> Result<(), ClientError> {
        let text = serde_json::to_string(message)?;
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }
}
