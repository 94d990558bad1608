use crate::runtime::RuntimeScene;
use crate::time::SceneTime;
use cadence_scheduler::{AsyncTasksManager, CallbackTable, RestoreReport, SyncError, SyncSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which parts of a scene go into its network sync data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSyncOptions {
    pub sync_async_tasks: bool,
    pub sync_variables: bool,
    pub sync_time: bool,
}

impl Default for SceneSyncOptions {
    fn default() -> Self {
        Self {
            sync_async_tasks: true,
            sync_variables: true,
            sync_time: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSyncData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub async_tasks: Option<SyncSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<SceneTime>,
}

impl RuntimeScene {
    pub fn get_network_sync_data(&self, options: &SceneSyncOptions) -> SceneSyncData {
        SceneSyncData {
            async_tasks: options.sync_async_tasks.then(|| self.tasks().snapshot()),
            variables: options.sync_variables.then(|| self.variables().to_sorted()),
            time: options.sync_time.then(|| *self.time()),
        }
    }

    /// Applies `data` to the scene.
    ///
    /// Tasks are restored first. If they are rejected, the scene is left
    /// exactly as it was: time and variables are only applied once the
    /// restore succeeded. Returns the restore report when `data` carried tasks.
    pub fn update_from_network_sync_data(
        &mut self,
        data: &SceneSyncData,
        callbacks: &CallbackTable<RuntimeScene>,
    ) -> Result<Option<RestoreReport>, SyncError> {
        let report = match &data.async_tasks {
            Some(snapshot) => Some(AsyncTasksManager::restore(self, snapshot, callbacks)?),
            None => None,
        };

        if let Some(time) = &data.time {
            *self.time_mut() = *time;
        }
        if let Some(variables) = &data.variables {
            self.variables_mut().replace_all(variables);
        }
        Ok(report)
    }
}
