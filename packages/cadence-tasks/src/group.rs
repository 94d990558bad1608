use crate::TimeSource;
use crate::task::AsyncTask;

/// A task finishing once all of its children finished.
///
/// Finished children are dropped as soon as they are observed finished, so a
/// long-running group only keeps what is still pending.
#[derive(Debug, Default)]
pub struct TaskGroup {
    tasks: Vec<AsyncTask>,
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: impl IntoIterator<Item = AsyncTask>) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
        }
    }

    pub fn add_task(&mut self, task: impl Into<AsyncTask>) {
        self.tasks.push(task.into());
    }

    /// Pending children, in insertion order.
    pub fn tasks(&self) -> &[AsyncTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Polls every child once, in insertion order, pruning the finished ones.
    pub fn poll<T: TimeSource + ?Sized>(&mut self, time: &T) -> bool {
        self.tasks.retain_mut(|task| !task.poll(time));
        self.tasks.is_empty()
    }

    pub(crate) fn replace_tasks(&mut self, tasks: Vec<AsyncTask>) {
        self.tasks = tasks;
    }
}

impl FromIterator<AsyncTask> for TaskGroup {
    fn from_iter<I: IntoIterator<Item = AsyncTask>>(iter: I) -> Self {
        Self::with_tasks(iter)
    }
}
