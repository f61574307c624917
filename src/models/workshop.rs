use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a workshop record. `Ended` is eventually consistent
/// with the hub: it is set lazily once the room has retired, not atomically
/// with the last leave.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopStatus {
    Active,
    Ended,
}

/// Persisted workshop record. Created over REST before any session traffic
/// exists; the hub only ever reads `id` as the room key.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopRecord {
    pub id: Uuid,
    pub content_id: String,
    pub created_by: String,
    pub status: WorkshopStatus,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a workshop
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkshopRequest {
    pub content_id: String,
    pub created_by: String,
}

/// One entry of the active-workshop listing: the persisted record joined
/// with presence-derived occupancy.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWorkshop {
    pub id: Uuid,
    pub content_id: String,
    pub created_by: String,
    pub participant_count: usize,
}
