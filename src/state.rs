use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::hub::Hub;
use crate::models::{CreateWorkshopRequest, WorkshopRecord, WorkshopStatus};

/// Shared application state, handed to every handler as `Arc<AppState>`.
#[derive(Debug, Default)]
pub struct AppState {
    pub hub: Hub,
    pub workshops: WorkshopStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the records behind retired rooms as ended. Called by the
    /// websocket layer after hub operations report retirements; the status
    /// flip is eventually consistent with the room's actual end.
    pub async fn retire_workshops(&self, workshop_ids: &[String]) {
        for workshop_id in workshop_ids {
            self.workshops.mark_ended(workshop_id).await;
        }
    }
}

/// In-memory store of workshop records. Stands in for the platform's
/// persistence layer: records are created over REST before any join
/// traffic, and the hub itself only ever reads ids.
#[derive(Debug, Default)]
pub struct WorkshopStore {
    records: RwLock<HashMap<Uuid, WorkshopRecord>>,
}

impl WorkshopStore {
    pub async fn create(&self, request: CreateWorkshopRequest) -> WorkshopRecord {
        let record = WorkshopRecord {
            id: Uuid::new_v4(),
            content_id: request.content_id,
            created_by: request.created_by,
            status: WorkshopStatus::Active,
            created_at: Utc::now(),
        };
        self.records.write().await.insert(record.id, record.clone());
        info!("Created workshop record {} for content {}", record.id, record.content_id);
        record
    }

    pub async fn get(&self, id: Uuid) -> Option<WorkshopRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Records not yet ended.
    pub async fn active(&self) -> Vec<WorkshopRecord> {
        self.records
            .read()
            .await
            .values()
            .filter(|record| record.status == WorkshopStatus::Active)
            .cloned()
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Flip a record to ended. Room keys that never had a record (the hub
    /// creates rooms lazily for any id) are ignored.
    pub async fn mark_ended(&self, workshop_id: &str) {
        let Ok(id) = Uuid::parse_str(workshop_id) else {
            return;
        };
        if let Some(record) = self.records.write().await.get_mut(&id) {
            record.status = WorkshopStatus::Ended;
            info!("Workshop record {id} marked ended");
        }
    }
}
