use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

use crate::models::{
    ActiveWorkshop, CreateWorkshopRequest, ErrorResponse, WorkshopRecord,
};
use crate::state::AppState;

/// Create a workshop record. Happens before any session traffic: clients
/// join by the returned id.
pub async fn create_workshop(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateWorkshopRequest>,
) -> Result<(StatusCode, Json<WorkshopRecord>), (StatusCode, Json<ErrorResponse>)> {
    if payload.content_id.trim().is_empty() || payload.created_by.trim().is_empty() {
        warn!("Rejected workshop creation with empty contentId/createdBy");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                code: StatusCode::BAD_REQUEST.as_u16(),
                status: "Bad Request".to_string(),
                error: "contentId and createdBy must be non-empty".to_string(),
            }),
        ));
    }

    let record = app_state.workshops.create(payload).await;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List currently-open workshops: every non-ended record, joined with the
/// hub's presence-derived occupancy. Freshly created workshops show up with
/// zero participants until the first join.
pub async fn active_workshops(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<ActiveWorkshop>> {
    let records = app_state.workshops.active().await;
    let mut listing = Vec::with_capacity(records.len());
    for record in records {
        let participant_count = app_state
            .hub
            .participant_count(&record.id.to_string())
            .await;
        listing.push(ActiveWorkshop {
            id: record.id,
            content_id: record.content_id,
            created_by: record.created_by,
            participant_count,
        });
    }
    info!("Listed {} active workshop(s)", listing.len());
    Json(listing)
}
