#![allow(dead_code)]

use cadence_objects::{LongLivedObjects, ObjectId, ObjectResolver, ObjectStore, SceneObject};
use cadence_scheduler::{AsyncTasksManager, SimulationContext};
use cadence_tasks::{AsyncTask, TimeSource};
use std::rc::Rc;

/// Minimal scene: a frame delta, objects, a log callbacks write to.
#[derive(Default)]
pub struct TestScene {
    pub elapsed_ms: f64,
    pub objects: ObjectStore,
    pub tasks: AsyncTasksManager<TestScene>,
    pub log: Vec<String>,
}

impl TestScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one frame of `elapsed_ms` and polls the tasks.
    pub fn step(&mut self, elapsed_ms: f64) -> usize {
        self.elapsed_ms = elapsed_ms;
        AsyncTasksManager::process_tasks(self)
    }

    /// Schedules `task` with a callback logging `id`.
    pub fn schedule_logged(&mut self, task: impl Into<AsyncTask>, id: &str) {
        let label = id.to_string();
        self.tasks.schedule(
            task,
            move |scene: &mut TestScene, _: &LongLivedObjects| scene.log.push(label),
            id,
            LongLivedObjects::new(),
        );
    }
}

impl TimeSource for TestScene {
    fn elapsed_time_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

impl ObjectResolver for TestScene {
    fn resolve_object(&self, id: &ObjectId) -> Option<Rc<SceneObject>> {
        self.objects.get(id)
    }
}

impl SimulationContext for TestScene {
    fn async_tasks(&self) -> &AsyncTasksManager<Self> {
        &self.tasks
    }

    fn async_tasks_mut(&mut self) -> &mut AsyncTasksManager<Self> {
        &mut self.tasks
    }
}
