use std::sync::Arc;

use tracing::info;

use crate::hub::registry::Outbox;
use crate::models::JoinWorkshopMessage;
use crate::state::AppState;

/// Handle JoinWorkshopMessage
pub async fn handle_join_message(
    join_msg: &JoinWorkshopMessage,
    connection_id: &str,
    outbox: &Outbox,
    app_state: &Arc<AppState>,
) {
    info!(
        "Join message received for workshop {}: user={}",
        join_msg.workshop_id, join_msg.user.username
    );

    let retired = app_state
        .hub
        .join(
            &join_msg.workshop_id,
            connection_id,
            join_msg.user.clone(),
            outbox.clone(),
        )
        .await;

    // Rooms abandoned by the implicit leave from a previous workshop
    app_state.retire_workshops(&retired).await;
}
