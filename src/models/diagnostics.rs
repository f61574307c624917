use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hub and process counters for the diagnostics endpoint.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsResponse {
    pub n_conn: u32,
    pub n_rooms: u32,
    pub n_participants: u32,
    pub n_workshop_records: u32,
    pub cpu_usage: f32,
    pub memory_alloc: u64,
    pub memory_total: u64,
    pub memory_free: u64,
}
