use cadence_core::objects::LongLivedObjects;
use cadence_core::scheduler::CallbackTable;
use cadence_core::tasks::{PromiseTask, TaskGroup};
use cadence_core::{RuntimeScene, SceneSyncData, SceneSyncOptions, ScenePhase};
use futures::executor::block_on;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_wait_uses_scene_seconds() {
    let mut scene = RuntimeScene::new("Level");
    scene.schedule(
        RuntimeScene::wait(1.0),
        |scene: &mut RuntimeScene, _: &LongLivedObjects| scene.variables_mut().set("Done", 1.0),
        "done",
        LongLivedObjects::new(),
    );

    scene.step(600.0);
    assert!(!scene.variables().has("Done"));
    scene.step(500.0);
    assert_eq!(scene.variables().get("Done"), 1.0);
    assert_eq!(scene.profiling().tasks_completed, 1);
}

#[test]
fn test_time_scale_slows_waits() {
    let mut scene = RuntimeScene::new("Level");
    scene.time_mut().time_scale = 0.5;
    scene.schedule(
        RuntimeScene::wait(0.1),
        |scene: &mut RuntimeScene, _: &LongLivedObjects| scene.variables_mut().add("Fired", 1.0),
        "slow",
        LongLivedObjects::new(),
    );

    scene.step(100.0);
    assert_eq!(scene.variables().get("Fired"), 0.0);
    scene.step(100.0);
    assert_eq!(scene.variables().get("Fired"), 1.0);
}

#[test]
fn test_events_run_before_tasks() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut scene = RuntimeScene::new("Level");

    let events_order = Rc::clone(&order);
    scene.add_events(move |scene: &mut RuntimeScene| {
        assert_eq!(scene.phase(), ScenePhase::Events);
        events_order.borrow_mut().push("events");
        let task_order = Rc::clone(&events_order);
        scene.schedule(
            RuntimeScene::wait(0.0),
            move |scene: &mut RuntimeScene, _: &LongLivedObjects| {
                assert_eq!(scene.phase(), ScenePhase::Tasks);
                task_order.borrow_mut().push("task");
            },
            "tick",
            LongLivedObjects::new(),
        );
    });
    let render_order = Rc::clone(&order);
    scene.set_render_hook(move |_: &RuntimeScene| render_order.borrow_mut().push("render"));

    scene.step(16.0);
    assert_eq!(*order.borrow(), vec!["events", "task", "render"]);
    assert_eq!(scene.phase(), ScenePhase::Idle);
}

#[test]
fn test_promise_driven_outside_the_frame_loop() {
    let mut scene = RuntimeScene::new("Level");
    let (task, driver) = PromiseTask::wrap(async { Ok::<_, String>(42) });
    scene.schedule(
        task,
        |scene: &mut RuntimeScene, _: &LongLivedObjects| scene.variables_mut().set("Loaded", 1.0),
        "load",
        LongLivedObjects::new(),
    );

    scene.step(16.0);
    assert!(!scene.variables().has("Loaded"));
    block_on(driver);
    scene.step(16.0);
    assert!(scene.variables().has("Loaded"));
}

#[test]
fn test_unload_drops_pending_tasks() {
    let mut scene = RuntimeScene::new("Level");
    scene.create_object("Player", "p1");
    scene.schedule(
        RuntimeScene::wait(0.1),
        |scene: &mut RuntimeScene, _: &LongLivedObjects| scene.variables_mut().set("Fired", 1.0),
        "late",
        LongLivedObjects::new(),
    );

    scene.unload();
    scene.step(1000.0);

    assert!(scene.tasks().is_empty());
    assert!(scene.objects().is_empty());
    assert!(!scene.variables().has("Fired"));
}

#[test]
fn test_network_sync_data_shape() {
    let mut scene = RuntimeScene::new("Level");
    let player = scene.create_object("Player", "p1");
    scene.variables_mut().set("Score", 3.0);
    scene.schedule(
        TaskGroup::with_tasks([RuntimeScene::wait(0.5).into(), RuntimeScene::wait(1.0).into()]),
        |_: &mut RuntimeScene, _: &LongLivedObjects| {},
        "both",
        LongLivedObjects::new().with_object("Player", player),
    );
    scene.step(200.0);

    let options = SceneSyncOptions {
        sync_time: false,
        ..SceneSyncOptions::default()
    };
    let value = serde_json::to_value(scene.get_network_sync_data(&options)).expect("sync data serializes");
    assert_eq!(
        value,
        json!({
            "asyncTasks": {
                "tasks": [{
                    "callbackIdentifier": "both",
                    "task": {
                        "type": "group",
                        "tasks": [
                            { "type": "wait", "duration": 500.0, "elapsed": 200.0 },
                            { "type": "wait", "duration": 1000.0, "elapsed": 200.0 }
                        ]
                    },
                    "objects": ["p1"]
                }]
            },
            "variables": { "Score": 3.0 }
        })
    );
}

#[test]
fn test_peer_resumes_from_sync_data() {
    let mut host = RuntimeScene::new("Level");
    let enemy = host.create_object("Enemy", "e1");
    host.variables_mut().set("Wave", 2.0);
    host.schedule(
        RuntimeScene::wait(0.5),
        |_: &mut RuntimeScene, _: &LongLivedObjects| {},
        "explode",
        LongLivedObjects::new().with_object("Enemy", enemy),
    );
    host.step(300.0);

    let json = serde_json::to_string(&host.get_network_sync_data(&SceneSyncOptions::default()))
        .expect("sync data serializes");
    let data: SceneSyncData = serde_json::from_str(&json).expect("sync data decodes");

    let mut peer = RuntimeScene::new("Level");
    let peer_enemy = peer.create_object("Enemy", "e1");
    let callbacks = CallbackTable::new().with("explode", |scene: &mut RuntimeScene, objects: &LongLivedObjects| {
        for enemy in objects.objects("Enemy") {
            enemy.set_variable("Exploded", 1.0);
        }
        scene.variables_mut().add("Explosions", 1.0);
    });
    let report = peer
        .update_from_network_sync_data(&data, &callbacks)
        .expect("sync data is valid")
        .expect("tasks were synced");

    assert_eq!(report.restored, 1);
    assert_eq!(peer.variables().get("Wave"), 2.0);
    assert_eq!(peer.time().time_from_start_ms, 300.0);

    peer.step(199.0);
    assert_eq!(peer.variables().get("Explosions"), 0.0);
    peer.step(1.0);
    assert_eq!(peer.variables().get("Explosions"), 1.0);
    assert_eq!(peer_enemy.variable("Exploded"), 1.0);
}

#[test]
fn test_sync_without_tasks_keeps_pending_ones() {
    let mut scene = RuntimeScene::new("Level");
    scene.schedule(
        RuntimeScene::wait(0.1),
        |_: &mut RuntimeScene, _: &LongLivedObjects| {},
        "local",
        LongLivedObjects::new(),
    );

    let data = SceneSyncData {
        variables: Some([("Lives".to_string(), 3.0)].into_iter().collect()),
        ..SceneSyncData::default()
    };
    let report = scene
        .update_from_network_sync_data(&data, &CallbackTable::new())
        .expect("sync data is valid");

    assert!(report.is_none());
    assert_eq!(scene.tasks().len(), 1);
    assert_eq!(scene.variables().get("Lives"), 3.0);
}

#[test]
fn test_rejected_sync_leaves_scene_unchanged() {
    let mut scene = RuntimeScene::new("Level");
    scene.variables_mut().set("Score", 10.0);
    scene.step(100.0);
    scene.schedule(
        RuntimeScene::wait(0.1),
        |_: &mut RuntimeScene, _: &LongLivedObjects| {},
        "local",
        LongLivedObjects::new(),
    );

    let data: SceneSyncData = serde_json::from_value(json!({
        "asyncTasks": {
            "tasks": [{ "callbackIdentifier": "bad", "task": { "type": "wait", "duration": -1, "elapsed": 0 } }]
        },
        "variables": { "Score": 99.0 },
        "time": { "elapsedMs": 16.0, "timeScale": 3.0, "timeFromStartMs": 9999.0, "frame": 42 }
    }))
    .expect("sync data decodes");
    let callbacks = CallbackTable::new().with("bad", |_: &mut RuntimeScene, _: &LongLivedObjects| {});

    assert!(scene.update_from_network_sync_data(&data, &callbacks).is_err());
    assert_eq!(scene.variables().get("Score"), 10.0);
    assert_eq!(scene.time().time_from_start_ms, 100.0);
    assert_eq!(scene.time().time_scale, 1.0);
    assert_eq!(scene.time().frame, 1);
    let ids: Vec<_> = scene.tasks().callback_identifiers().collect();
    assert_eq!(ids, vec!["local"]);
}
