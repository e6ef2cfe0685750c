use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PortalError, PortalResult};

/// Conflict key of a progress record: one row per user and schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressKey {
    user_id: Uuid,
    schedule_id: Uuid,
}

impl ProgressKey {
    pub fn new(user_id: Uuid, schedule_id: Uuid) -> PortalResult<Self> {
        if user_id.is_nil() {
            return Err(PortalError::Validation("Progress key requires a user id".to_string()));
        }
        if schedule_id.is_nil() {
            return Err(PortalError::Validation(
                "Progress key requires a schedule id".to_string(),
            ));
        }
        Ok(Self { user_id, schedule_id })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn schedule_id(&self) -> Uuid {
        self.schedule_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: Uuid,
    pub schedule_id: Uuid,
    pub is_done: bool,
    pub remarks: String,
    pub updated_at: DateTime<Utc>,
}

/// A single-field progress write. Storing it overwrites only the targeted
/// field; a record created by it starts as not done with empty remarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressPatch {
    Completion(bool),
    Remarks(String),
}

impl ProgressPatch {
    pub fn field_name(&self) -> &'static str {
        match self {
            ProgressPatch::Completion(_) => "is_done",
            ProgressPatch::Remarks(_) => "remarks",
        }
    }
}

/// Progress of one user, indexed by schedule entry id.
pub type ProgressMap = HashMap<Uuid, ProgressRecord>;

pub fn index_progress(records: impl IntoIterator<Item = ProgressRecord>) -> ProgressMap {
    records.into_iter().map(|r| (r.schedule_id, r)).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCompletionRequest {
    pub is_done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRemarksRequest {
    pub remarks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressWriteResponse {
    pub schedule_id: Uuid,
    pub saved: bool,
}
