pub mod runtime;
pub mod sync;
pub mod time;
pub mod variables;

pub use runtime::{EventsFunction, Profiling, RuntimeScene, ScenePhase};
pub use sync::{SceneSyncData, SceneSyncOptions};
pub use time::SceneTime;
pub use variables::Variables;

pub use cadence_objects as objects;
pub use cadence_scheduler as scheduler;
pub use cadence_tasks as tasks;
