use tracing::debug;

use crate::hub::registry::Room;
use crate::models::ServerMessage;

/// Fan a message out to every member of a room, except `skip` (the sender,
/// when echo suppression applies). Delivery is an unbounded push into each
/// recipient's writer task; a closed outbox means that peer is tearing down
/// and its own disconnect path will clean it up, so send errors are dropped.
pub fn broadcast(room: &Room, message: &ServerMessage, skip: Option<&str>) {
    for (connection_id, participant) in room {
        if skip.is_some_and(|id| id == connection_id) {
            continue;
        }
        if participant.outbox.send(message.clone()).is_err() {
            debug!("Outbox closed for connection {connection_id}, skipping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::registry::SessionRegistry;
    use crate::models::{Identity, UserLeftMessage};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn broadcast_skips_sender_and_closed_outboxes() {
        let mut registry = SessionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let (tx_c, rx_c) = mpsc::unbounded_channel();
        drop(rx_c); // c's writer already went away

        for (conn, tx) in [("a", tx_a), ("b", tx_b), ("c", tx_c)] {
            registry.join(
                "w1",
                conn,
                Identity {
                    id: conn.to_string(),
                    username: conn.to_string(),
                    role: "student".to_string(),
                },
                tx,
            );
        }

        let msg = ServerMessage::UserLeft(UserLeftMessage {
            connection_id: "a".to_string(),
        });
        broadcast(registry.room("w1").unwrap(), &msg, Some("a"));

        assert!(rx_a.try_recv().is_err());
        assert!(matches!(
            rx_b.try_recv(),
            Ok(ServerMessage::UserLeft(left)) if left.connection_id == "a"
        ));
    }
}
