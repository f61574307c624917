use std::sync::Arc;

use tracing::debug;

use crate::models::UpdateTransformMessage;
use crate::state::AppState;

/// Handle UpdateTransformMessage
///
/// Pure pass-through: overwrite the stored transform and rebroadcast. The
/// sending client owns its own update cadence; there is no server-side
/// batching or rate limiting.
pub async fn handle_transform_message(
    transform_msg: &UpdateTransformMessage,
    connection_id: &str,
    app_state: &Arc<AppState>,
) {
    debug!(
        "Transform update for workshop {} from {connection_id}",
        transform_msg.workshop_id
    );

    app_state
        .hub
        .update_transform(
            &transform_msg.workshop_id,
            connection_id,
            transform_msg.transform,
        )
        .await;
}
