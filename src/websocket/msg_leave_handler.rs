use std::sync::Arc;

use tracing::info;

use crate::models::LeaveWorkshopMessage;
use crate::state::AppState;

/// Handle LeaveWorkshopMessage
pub async fn handle_leave_message(
    leave_msg: &LeaveWorkshopMessage,
    connection_id: &str,
    app_state: &Arc<AppState>,
) {
    info!(
        "Leave message received for workshop {} from {connection_id}",
        leave_msg.workshop_id
    );

    if app_state
        .hub
        .leave(&leave_msg.workshop_id, connection_id)
        .await
    {
        app_state
            .retire_workshops(std::slice::from_ref(&leave_msg.workshop_id))
            .await;
    }
}
