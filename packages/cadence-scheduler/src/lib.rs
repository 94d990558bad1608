pub mod callbacks;
pub mod manager;
pub mod snapshot;

use cadence_objects::ObjectResolver;
use cadence_tasks::TimeSource;

/// The simulation state deferred game logic runs against.
///
/// A context owns its [`AsyncTasksManager`]: there is one registry per scene
/// and nothing global. Callbacks receive the context mutably, so they can
/// schedule more work through [`SimulationContext::async_tasks_mut`].
pub trait SimulationContext: TimeSource + ObjectResolver + Sized + 'static {
    fn async_tasks(&self) -> &AsyncTasksManager<Self>;

    fn async_tasks_mut(&mut self) -> &mut AsyncTasksManager<Self>;
}

pub use callbacks::{CallbackTable, SharedTaskCallback, TaskCallback};
pub use manager::{AsyncTasksManager, RestoreReport, TaskStats, UnresumableTask};
pub use snapshot::{SyncError, SyncSnapshot, TaskEntrySyncData};
