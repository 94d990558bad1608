use crate::SimulationContext;
use crate::callbacks::{CallbackTable, TaskCallback};
use crate::snapshot::{SyncError, SyncSnapshot, TaskEntrySyncData};
use cadence_objects::LongLivedObjects;
use cadence_tasks::{AsyncTask, TaskResolver};
use std::fmt;

struct TaskEntry<C> {
    task: AsyncTask,
    callback: TaskCallback<C>,
    callback_id: String,
    objects: LongLivedObjects,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub scheduled: u64,
    pub completed: u64,
    pub cleared: u64,
}

/// A restored entry whose task could not be resumed.
///
/// It waits on `resolver`; the restoring peer decides whether to re-issue the
/// external operation or to resolve it right away.
#[derive(Debug, Clone)]
pub struct UnresumableTask {
    pub callback_identifier: String,
    pub resolver: TaskResolver,
}

#[derive(Debug, Default)]
pub struct RestoreReport {
    pub restored: usize,
    /// Identifiers with no callback in the table, in snapshot order.
    pub dropped: Vec<String>,
    pub unresumable: Vec<UnresumableTask>,
}

impl RestoreReport {
    /// Treats every unresumable task as already completed.
    pub fn resolve_unresumable(&self) {
        for task in &self.unresumable {
            task.resolver.resolve();
        }
    }
}

/// Registry of pending tasks and their continuations.
///
/// Entries keep registration order. Each frame, [`AsyncTasksManager::process_tasks`]
/// polls every entry once and runs the callbacks of the finished ones.
pub struct AsyncTasksManager<C> {
    entries: Vec<TaskEntry<C>>,
    // Bumped by `clear`, so a pass notices a clear issued by one of its callbacks.
    generation: u64,
    stats: TaskStats,
}

impl<C> Default for AsyncTasksManager<C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            generation: 0,
            stats: TaskStats::default(),
        }
    }
}

impl<C> AsyncTasksManager<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `task`. `callback` runs exactly once, on the first pass
    /// observing the task finished, with `objects` still reachable.
    ///
    /// Identifiers need not be unique: they only correlate snapshot entries
    /// with callbacks.
    pub fn schedule<F>(
        &mut self,
        task: impl Into<AsyncTask>,
        callback: F,
        callback_id: impl Into<String>,
        objects: LongLivedObjects,
    ) where
        F: FnOnce(&mut C, &LongLivedObjects) + 'static,
    {
        let task = task.into();
        let callback_id = callback_id.into();
        tracing::debug!("Scheduling {} task for callback {}", task.kind(), callback_id);
        self.entries.push(TaskEntry {
            task,
            callback: Box::new(callback),
            callback_id,
            objects,
        });
        self.stats.scheduled += 1;
    }

    /// Drops every entry without running its callback.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!("Clearing {} pending tasks", self.entries.len());
        }
        self.stats.cleared += self.entries.len() as u64;
        self.entries.clear();
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Callback identifiers of the pending entries, in registration order.
    pub fn callback_identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.callback_id.as_str())
    }

    pub fn stats(&self) -> TaskStats {
        self.stats
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            tasks: self
                .entries
                .iter()
                .map(|entry| TaskEntrySyncData {
                    callback_identifier: entry.callback_id.clone(),
                    task: entry.task.to_sync_record(),
                    objects: entry.objects.to_sync_data(),
                })
                .collect(),
        }
    }
}

impl<C: SimulationContext> AsyncTasksManager<C> {
    /// Runs one pass over the tasks of `ctx`. Returns the number of callbacks run.
    ///
    /// Entries scheduled by callbacks are appended after the pending ones and
    /// first polled on the next pass. If a callback clears the manager, the
    /// pass stops and every entry registered before the clear is dropped.
    pub fn process_tasks(ctx: &mut C) -> usize {
        let manager = ctx.async_tasks_mut();
        let generation = manager.generation;
        let entries = std::mem::take(&mut manager.entries);
        let mut remaining = Vec::with_capacity(entries.len());
        let mut completed = 0;

        let mut entries = entries.into_iter();
        while let Some(mut entry) = entries.next() {
            if !entry.task.poll(&*ctx) {
                remaining.push(entry);
                continue;
            }

            tracing::debug!("Task for callback {} finished", entry.callback_id);
            let TaskEntry {
                callback, objects, ..
            } = entry;
            callback(&mut *ctx, &objects);
            completed += 1;

            if ctx.async_tasks().generation != generation {
                let abandoned = remaining.len() + entries.len();
                tracing::debug!("Tasks cleared during the pass, dropping {} entries", abandoned);
                let stats = &mut ctx.async_tasks_mut().stats;
                stats.completed += completed as u64;
                stats.cleared += abandoned as u64;
                return completed;
            }
        }

        let manager = ctx.async_tasks_mut();
        let scheduled_during_pass = std::mem::replace(&mut manager.entries, remaining);
        manager.entries.extend(scheduled_during_pass);
        manager.stats.completed += completed as u64;
        completed
    }

    /// Replaces the tasks of `ctx` with the entries of `snapshot`.
    ///
    /// Callbacks are looked up by identifier in `callbacks`; entries with an
    /// unknown identifier are dropped. Objects are re-resolved through `ctx`.
    /// Every entry is validated before the registry is touched: on error the
    /// current tasks are left as they were.
    pub fn restore(
        ctx: &mut C,
        snapshot: &SyncSnapshot,
        callbacks: &CallbackTable<C>,
    ) -> Result<RestoreReport, SyncError> {
        let mut report = RestoreReport::default();
        let mut entries = Vec::with_capacity(snapshot.tasks.len());

        for data in &snapshot.tasks {
            let mut resolvers = Vec::new();
            let task = AsyncTask::from_sync_record(data.task.as_ref(), &mut |resolver: TaskResolver| {
                resolvers.push(resolver)
            })
            .map_err(|source| SyncError::InvalidTask {
                callback_identifier: data.callback_identifier.clone(),
                source,
            })?;

            let Some(callback) = callbacks.get(&data.callback_identifier) else {
                tracing::debug!(
                    "No callback registered for {}, dropping its task",
                    data.callback_identifier
                );
                report.dropped.push(data.callback_identifier.clone());
                continue;
            };

            let callback = callback.clone();
            let objects = LongLivedObjects::from_sync_data(&data.objects, &*ctx);
            report
                .unresumable
                .extend(resolvers.into_iter().map(|resolver| UnresumableTask {
                    callback_identifier: data.callback_identifier.clone(),
                    resolver,
                }));
            entries.push(TaskEntry {
                task,
                callback: Box::new(move |ctx: &mut C, objects: &LongLivedObjects| {
                    callback(ctx, objects)
                }),
                callback_id: data.callback_identifier.clone(),
                objects,
            });
        }

        report.restored = entries.len();
        let manager = ctx.async_tasks_mut();
        manager.clear();
        manager.entries = entries;
        manager.stats.scheduled += report.restored as u64;

        tracing::info!(
            "Restored {} tasks ({} dropped, {} unresumable)",
            report.restored,
            report.dropped.len(),
            report.unresumable.len()
        );
        Ok(report)
    }
}

impl<C> fmt::Debug for AsyncTasksManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTasksManager")
            .field("pending", &self.entries.len())
            .field("generation", &self.generation)
            .field("stats", &self.stats)
            .finish()
    }
}
