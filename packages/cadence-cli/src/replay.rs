use anyhow::{Context, Result};
use cadence_core::objects::{LongLivedObjects, ObjectId};
use cadence_core::scheduler::{CallbackTable, SyncSnapshot};
use cadence_core::{RuntimeScene, SceneSyncData};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

/// Object name -> ids of the objects to create before restoring.
pub type SceneObjects = BTreeMap<String, Vec<ObjectId>>;

/// Name given to objects only known by id from the snapshot.
const UNNAMED_OBJECT: &str = "Object";

#[derive(Debug, clap::Args)]
pub struct ReplayArgs {
    /// Snapshot JSON file
    pub snapshot: PathBuf,

    /// Number of frames to step
    #[arg(long, default_value_t = 60)]
    pub frames: u64,

    /// Duration of each frame, in milliseconds
    #[arg(long = "frame-ms", default_value_t = 16.0)]
    pub frame_ms: f64,

    /// Objects present in the scene, as `{"Name": ["id", ...]}`.
    /// Defaults to every object the snapshot references, named `Object`.
    #[arg(long)]
    pub objects: Option<PathBuf>,

    /// Resolve tasks that could not be resumed instead of leaving them pending
    #[arg(long)]
    pub resolve_unresumable: bool,
}

#[derive(Debug)]
pub struct ReplayOutcome {
    /// `(frame, callback identifier)` in firing order.
    pub fired: Vec<(u64, String)>,
    pub dropped: Vec<String>,
    pub unresumable: Vec<String>,
    pub pending: SyncSnapshot,
}

pub fn run(args: &ReplayArgs) -> Result<ReplayOutcome> {
    let snapshot = crate::load_snapshot(&args.snapshot)?;
    let objects = match &args.objects {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read objects {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid objects file {}", path.display()))?
        }
        None => referenced_objects(&snapshot),
    };
    replay(&snapshot, &objects, args)
}

/// Restores `snapshot` into a fresh scene holding `objects`, then steps it.
pub fn replay(
    snapshot: &SyncSnapshot,
    objects: &SceneObjects,
    args: &ReplayArgs,
) -> Result<ReplayOutcome> {
    let mut scene = RuntimeScene::new("replay");
    let mut created: BTreeMap<&ObjectId, &str> = BTreeMap::new();
    for (name, ids) in objects {
        for id in ids {
            created.entry(id).or_insert(name.as_str());
        }
    }
    for (id, name) in created {
        scene.create_object(name, id.clone());
    }

    let fired = Rc::new(RefCell::new(Vec::new()));
    let mut callbacks = CallbackTable::new();
    for entry in &snapshot.tasks {
        let fired = Rc::clone(&fired);
        let id = entry.callback_identifier.clone();
        callbacks.register(
            entry.callback_identifier.clone(),
            move |scene: &mut RuntimeScene, _: &LongLivedObjects| {
                tracing::info!("{} fired on frame {}", id, scene.time().frame);
                fired.borrow_mut().push((scene.time().frame, id.clone()));
            },
        );
    }

    let data = SceneSyncData {
        async_tasks: Some(snapshot.clone()),
        ..SceneSyncData::default()
    };
    let report = scene
        .update_from_network_sync_data(&data, &callbacks)
        .context("Snapshot could not be restored")?
        .unwrap_or_default();
    if args.resolve_unresumable {
        report.resolve_unresumable();
    }

    for _ in 0..args.frames {
        scene.step(args.frame_ms);
    }

    let fired = fired.borrow().clone();
    Ok(ReplayOutcome {
        fired,
        dropped: report.dropped.clone(),
        unresumable: report
            .unresumable
            .iter()
            .map(|task| task.callback_identifier.clone())
            .collect(),
        pending: scene.tasks().snapshot(),
    })
}

/// Every object id referenced by `snapshot`, in first-seen order.
fn referenced_objects(snapshot: &SyncSnapshot) -> SceneObjects {
    let mut ids: Vec<ObjectId> = Vec::new();
    for entry in &snapshot.tasks {
        for id in &entry.objects.ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
    }
    let mut objects = SceneObjects::new();
    if !ids.is_empty() {
        objects.insert(UNNAMED_OBJECT.to_string(), ids);
    }
    objects
}

impl ReplayOutcome {
    pub fn report(&self) -> String {
        let mut out = String::new();
        for (frame, id) in &self.fired {
            out.push_str(&format!("frame {}: {}\n", frame, id));
        }
        for id in &self.dropped {
            out.push_str(&format!("dropped (no callback): {}\n", id));
        }
        for id in &self.unresumable {
            out.push_str(&format!("not resumable: {}\n", id));
        }
        out.push_str(&format!("{} still pending\n", self.pending.len()));
        for entry in &self.pending.tasks {
            out.push_str(&format!("  {}\n", entry.callback_identifier));
        }
        out
    }
}
