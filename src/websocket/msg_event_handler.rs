use std::sync::Arc;

use tracing::info;

use crate::models::SyncEventMessage;
use crate::state::AppState;

/// Handle SyncEventMessage
pub async fn handle_event_message(
    event_msg: SyncEventMessage,
    connection_id: &str,
    app_state: &Arc<AppState>,
) {
    info!(
        "Sync event '{}' for workshop {} from {connection_id}",
        event_msg.event_type, event_msg.workshop_id
    );

    app_state
        .hub
        .relay_event(
            &event_msg.workshop_id,
            connection_id,
            event_msg.event_type,
            event_msg.data,
        )
        .await;
}
