use cadence_objects::LongLivedObjectsSyncData;
use cadence_tasks::{TaskSyncError, TaskSyncRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every pending entry of a scheduler, in registration order.
///
/// Plain data: callbacks are referenced by identifier and objects by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub tasks: Vec<TaskEntrySyncData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEntrySyncData {
    pub callback_identifier: String,
    pub task: Option<TaskSyncRecord>,
    #[serde(default)]
    pub objects: LongLivedObjectsSyncData,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid task record for callback `{callback_identifier}`: {source}")]
    InvalidTask {
        callback_identifier: String,
        #[source]
        source: TaskSyncError,
    },
}

impl SyncSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SyncError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
