pub mod group;
pub mod manual;
pub mod promise;
pub mod sync;
pub mod task;
pub mod wait;

/// Frame timing as seen by tasks.
///
/// Implemented by the simulation context; tasks read it while being polled.
pub trait TimeSource {
    /// Time elapsed since the previous frame, in milliseconds.
    fn elapsed_time_ms(&self) -> f64;
}

/// A fixed frame delta, handy when polling tasks outside of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime(pub f64);

impl TimeSource for FrameTime {
    fn elapsed_time_ms(&self) -> f64 {
        self.0
    }
}

pub use group::TaskGroup;
pub use manual::{ManuallyResolvableTask, ResolveTask, TaskResolver};
pub use promise::{PromiseSettler, PromiseTask};
pub use sync::{TaskSyncError, TaskSyncRecord};
pub use task::AsyncTask;
pub use wait::WaitTask;
