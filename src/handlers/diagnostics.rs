use std::sync::{Arc, Mutex, OnceLock};

use axum::{extract::State, http::StatusCode, Json};
use sysinfo::System;
use tracing::info;

use crate::models::DiagnosticsResponse;
use crate::state::AppState;

static SYSTEM_MONITOR: OnceLock<Mutex<System>> = OnceLock::new();

/// Hub and process diagnostics
pub async fn diagnostics(
    State(app_state): State<Arc<AppState>>,
) -> (StatusCode, Json<DiagnosticsResponse>) {
    // Aggregate counters from the hub's query surface
    let n_conn = app_state.hub.connection_count().await as u32;
    let n_rooms = app_state.hub.room_count().await as u32;
    let n_participants: u32 = app_state
        .hub
        .active_rooms()
        .await
        .iter()
        .map(|(_, count)| *count as u32)
        .sum();
    let n_workshop_records = app_state.workshops.count().await as u32;

    // System stats
    let (cpu_usage, memory_alloc, memory_free, memory_total) = {
        let sys_lock = SYSTEM_MONITOR.get_or_init(|| Mutex::new(System::new_all()));
        match sys_lock.lock() {
            Ok(mut sys) => {
                sys.refresh_cpu();
                sys.refresh_memory();
                (
                    sys.global_cpu_info().cpu_usage(),
                    sys.used_memory(),
                    sys.free_memory(),
                    sys.total_memory(),
                )
            }
            Err(_) => (0.0, 0, 0, 0),
        }
    };

    info!(
        "Diagnostics: CPU: {:.2}%, Mem: {}/{} MB (Free: {} MB), Conn: {}, Rooms: {}",
        cpu_usage,
        memory_alloc / 1024 / 1024,
        memory_total / 1024 / 1024,
        memory_free / 1024 / 1024,
        n_conn,
        n_rooms
    );

    (
        StatusCode::OK,
        Json(DiagnosticsResponse {
            n_conn,
            n_rooms,
            n_participants,
            n_workshop_records,
            cpu_usage,
            memory_alloc,
            memory_total,
            memory_free,
        }),
    )
}
