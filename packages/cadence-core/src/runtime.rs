use crate::time::SceneTime;
use crate::variables::Variables;
use cadence_objects::{LongLivedObjects, ObjectId, ObjectResolver, ObjectStore, SceneObject};
use cadence_scheduler::{AsyncTasksManager, SimulationContext};
use cadence_tasks::{AsyncTask, TimeSource, WaitTask};
use std::rc::Rc;

/// Game logic run once per frame, before tasks are polled.
pub type EventsFunction = Box<dyn FnMut(&mut RuntimeScene)>;

type RenderHook = Box<dyn FnMut(&RuntimeScene)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Idle,
    Events,
    Tasks,
    Render,
}

#[derive(Default, Debug, Clone)]
pub struct Profiling {
    pub frame_count: u64,
    pub tasks_completed: u64,
    pub events_run: u64,
}

/// A headless scene: objects, clock, variables and the deferred tasks of its
/// game logic.
pub struct RuntimeScene {
    pub name: String,
    objects: ObjectStore,
    time: SceneTime,
    variables: Variables,
    tasks: AsyncTasksManager<RuntimeScene>,
    events: Vec<EventsFunction>,
    render_hook: Option<RenderHook>,
    phase: ScenePhase,
    profiling: Profiling,
}

impl RuntimeScene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: ObjectStore::new(),
            time: SceneTime::default(),
            variables: Variables::new(),
            tasks: AsyncTasksManager::new(),
            events: Vec::new(),
            render_hook: None,
            phase: ScenePhase::Idle,
            profiling: Profiling::default(),
        }
    }

    /// Appends game logic run on every frame, in registration order.
    pub fn add_events<F>(&mut self, events: F)
    where
        F: FnMut(&mut RuntimeScene) + 'static,
    {
        self.events.push(Box::new(events));
    }

    pub fn set_render_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&RuntimeScene) + 'static,
    {
        self.render_hook = Some(Box::new(hook));
    }

    /// Runs one frame: game logic, then one pass over the tasks, then rendering.
    pub fn step(&mut self, frame_delta_ms: f64) {
        self.time.advance(frame_delta_ms);
        self.profiling.frame_count += 1;

        self.phase = ScenePhase::Events;
        let mut events = std::mem::take(&mut self.events);
        for run in events.iter_mut() {
            run(self);
            self.profiling.events_run += 1;
        }
        // Events added while running go after the existing ones.
        events.append(&mut self.events);
        self.events = events;

        self.phase = ScenePhase::Tasks;
        let completed = AsyncTasksManager::process_tasks(self);
        self.profiling.tasks_completed += completed as u64;
        if completed > 0 {
            tracing::debug!(
                "Scene {} frame {}: {} tasks completed, {} pending",
                self.name,
                self.time.frame,
                completed,
                self.tasks.len()
            );
        }

        self.phase = ScenePhase::Render;
        if let Some(mut hook) = self.render_hook.take() {
            hook(self);
            self.render_hook = Some(hook);
        }
        self.phase = ScenePhase::Idle;
    }

    /// Tears the scene down. Pending tasks are dropped without running.
    pub fn unload(&mut self) {
        tracing::info!("Unloading scene {} ({} pending tasks)", self.name, self.tasks.len());
        self.tasks.clear();
        self.objects.clear();
        self.events.clear();
    }

    /// Schedules `callback` to run once `task` finished.
    pub fn schedule<F>(
        &mut self,
        task: impl Into<AsyncTask>,
        callback: F,
        callback_id: impl Into<String>,
        objects: LongLivedObjects,
    ) where
        F: FnOnce(&mut RuntimeScene, &LongLivedObjects) + 'static,
    {
        self.tasks.schedule(task, callback, callback_id, objects);
    }

    /// A wait of `seconds` of scene time.
    pub fn wait(seconds: f64) -> WaitTask {
        WaitTask::new(seconds * 1000.0)
    }

    pub fn create_object(&mut self, name: impl Into<String>, id: impl Into<ObjectId>) -> Rc<SceneObject> {
        self.objects.create(name, id)
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectStore {
        &mut self.objects
    }

    pub fn time(&self) -> &SceneTime {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut SceneTime {
        &mut self.time
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    pub fn tasks(&self) -> &AsyncTasksManager<RuntimeScene> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut AsyncTasksManager<RuntimeScene> {
        &mut self.tasks
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn profiling(&self) -> &Profiling {
        &self.profiling
    }
}

impl TimeSource for RuntimeScene {
    fn elapsed_time_ms(&self) -> f64 {
        self.time.elapsed_ms
    }
}

impl ObjectResolver for RuntimeScene {
    fn resolve_object(&self, id: &ObjectId) -> Option<Rc<SceneObject>> {
        self.objects.get(id)
    }
}

impl SimulationContext for RuntimeScene {
    fn async_tasks(&self) -> &AsyncTasksManager<Self> {
        &self.tasks
    }

    fn async_tasks_mut(&mut self) -> &mut AsyncTasksManager<Self> {
        &mut self.tasks
    }
}
