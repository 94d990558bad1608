use crate::TimeSource;
use crate::group::TaskGroup;
use crate::manual::{ManuallyResolvableTask, ResolveTask, TaskResolver};
use crate::promise::PromiseTask;
use crate::sync::{TaskSyncError, TaskSyncRecord};
use crate::wait::WaitTask;

/// A pollable unit of deferred work.
///
/// `poll` may be called any number of times; once it returned `true` it keeps
/// returning `true`.
#[derive(Debug)]
pub enum AsyncTask {
    Wait(WaitTask),
    Promise(PromiseTask),
    ManuallyResolvable(ManuallyResolvableTask),
    Resolve(ResolveTask),
    Group(TaskGroup),
}

impl AsyncTask {
    pub fn poll<T: TimeSource + ?Sized>(&mut self, time: &T) -> bool {
        match self {
            AsyncTask::Wait(task) => task.poll(time),
            AsyncTask::Promise(task) => task.poll(),
            AsyncTask::ManuallyResolvable(task) => task.poll(),
            AsyncTask::Resolve(task) => task.poll(),
            AsyncTask::Group(group) => group.poll(time),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AsyncTask::Wait(_) => "wait",
            AsyncTask::Promise(_) => "promise",
            AsyncTask::ManuallyResolvable(_) => "manually-resolvable",
            AsyncTask::Resolve(_) => "resolve",
            AsyncTask::Group(_) => "group",
        }
    }

    /// Resumable state of the task. `None` for tasks whose state lives outside
    /// the process (promises, manual resolutions, already resolved tasks).
    pub fn to_sync_record(&self) -> Option<TaskSyncRecord> {
        match self {
            AsyncTask::Wait(task) => Some(TaskSyncRecord::Wait {
                duration: task.duration(),
                elapsed: task.elapsed(),
            }),
            AsyncTask::Group(group) => Some(TaskSyncRecord::Group {
                tasks: group.tasks().iter().map(AsyncTask::to_sync_record).collect(),
            }),
            AsyncTask::Promise(_) | AsyncTask::ManuallyResolvable(_) | AsyncTask::Resolve(_) => None,
        }
    }

    /// Rebuilds a task from its sync record.
    ///
    /// A `None` record cannot be resumed: it becomes a pending
    /// [`ManuallyResolvableTask`], and its resolver is handed to `unresumable`
    /// so the caller decides what completes it.
    pub fn from_sync_record(
        record: Option<&TaskSyncRecord>,
        unresumable: &mut dyn FnMut(TaskResolver),
    ) -> Result<Self, TaskSyncError> {
        match record {
            None => {
                let task = ManuallyResolvableTask::new();
                unresumable(task.resolver());
                Ok(task.into())
            }
            Some(TaskSyncRecord::Wait { duration, elapsed }) => {
                TaskSyncRecord::check_wait(*duration, *elapsed)?;
                Ok(WaitTask::resumed(*duration, *elapsed).into())
            }
            Some(TaskSyncRecord::Group { tasks }) => {
                let children = tasks
                    .iter()
                    .map(|child| Self::from_sync_record(child.as_ref(), unresumable))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(TaskGroup::with_tasks(children).into())
            }
        }
    }

    /// Restores this task in place from `record`.
    ///
    /// The record must describe the same kind of task. Group children are
    /// rebuilt from the record.
    pub fn restore_from_sync_record(
        &mut self,
        record: Option<&TaskSyncRecord>,
        unresumable: &mut dyn FnMut(TaskResolver),
    ) -> Result<(), TaskSyncError> {
        match (self, record) {
            (AsyncTask::Wait(task), Some(TaskSyncRecord::Wait { duration, elapsed })) => {
                TaskSyncRecord::check_wait(*duration, *elapsed)?;
                task.set_progress(*duration, *elapsed);
                Ok(())
            }
            (AsyncTask::Group(group), Some(TaskSyncRecord::Group { tasks })) => {
                let children = tasks
                    .iter()
                    .map(|child| Self::from_sync_record(child.as_ref(), unresumable))
                    .collect::<Result<Vec<_>, _>>()?;
                group.replace_tasks(children);
                Ok(())
            }
            (
                AsyncTask::Promise(_) | AsyncTask::ManuallyResolvable(_) | AsyncTask::Resolve(_),
                None,
            ) => Ok(()),
            (task, record) => Err(TaskSyncError::KindMismatch {
                task: task.kind(),
                record: record.map_or("null", TaskSyncRecord::kind),
            }),
        }
    }
}

impl From<WaitTask> for AsyncTask {
    fn from(task: WaitTask) -> Self {
        AsyncTask::Wait(task)
    }
}

impl From<PromiseTask> for AsyncTask {
    fn from(task: PromiseTask) -> Self {
        AsyncTask::Promise(task)
    }
}

impl From<ManuallyResolvableTask> for AsyncTask {
    fn from(task: ManuallyResolvableTask) -> Self {
        AsyncTask::ManuallyResolvable(task)
    }
}

impl From<ResolveTask> for AsyncTask {
    fn from(task: ResolveTask) -> Self {
        AsyncTask::Resolve(task)
    }
}

impl From<TaskGroup> for AsyncTask {
    fn from(group: TaskGroup) -> Self {
        AsyncTask::Group(group)
    }
}
