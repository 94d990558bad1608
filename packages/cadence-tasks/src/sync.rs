use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable state of a resumable task.
///
/// Tasks that cannot be resumed are recorded as `null`, i.e. `None` in an
/// `Option<TaskSyncRecord>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskSyncRecord {
    Wait {
        duration: f64,
        elapsed: f64,
    },
    Group {
        tasks: Vec<Option<TaskSyncRecord>>,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum TaskSyncError {
    #[error("invalid wait record: duration {duration}, elapsed {elapsed}")]
    InvalidWait { duration: f64, elapsed: f64 },

    #[error("cannot restore a {task} task from a {record} record")]
    KindMismatch {
        task: &'static str,
        record: &'static str,
    },
}

impl TaskSyncRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            TaskSyncRecord::Wait { .. } => "wait",
            TaskSyncRecord::Group { .. } => "group",
        }
    }

    pub(crate) fn check_wait(duration: f64, elapsed: f64) -> Result<(), TaskSyncError> {
        let valid = |value: f64| value.is_finite() && value >= 0.0;
        if valid(duration) && valid(elapsed) {
            Ok(())
        } else {
            Err(TaskSyncError::InvalidWait { duration, elapsed })
        }
    }

    /// Number of records in this tree, this one included.
    pub fn count(&self) -> usize {
        match self {
            TaskSyncRecord::Wait { .. } => 1,
            TaskSyncRecord::Group { tasks } => {
                1 + tasks
                    .iter()
                    .map(|task| task.as_ref().map_or(1, TaskSyncRecord::count))
                    .sum::<usize>()
            }
        }
    }
}
