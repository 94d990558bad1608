use cadence_tasks::{
    AsyncTask, FrameTime, ManuallyResolvableTask, PromiseTask, ResolveTask, TaskGroup,
    TaskResolver, TaskSyncError, TaskSyncRecord, WaitTask,
};
use serde_json::json;

fn ignore_resolver(_: TaskResolver) {}

#[test]
fn test_wait_record_shape() {
    let mut wait = AsyncTask::from(WaitTask::new(500.0));
    wait.poll(&FrameTime(200.0));

    let record = wait.to_sync_record();
    assert_eq!(
        serde_json::to_value(&record).expect("record serializes"),
        json!({ "type": "wait", "duration": 500.0, "elapsed": 200.0 })
    );
}

#[test]
fn test_unresumable_tasks_record_null() {
    let (promise, _settler) = PromiseTask::pending();
    let tasks: Vec<AsyncTask> = vec![
        promise.into(),
        ManuallyResolvableTask::new().into(),
        ResolveTask.into(),
    ];
    for task in &tasks {
        assert!(task.to_sync_record().is_none(), "{} should not be resumable", task.kind());
    }

    let group = AsyncTask::from(TaskGroup::with_tasks(tasks));
    assert_eq!(
        serde_json::to_value(group.to_sync_record()).expect("record serializes"),
        json!({ "type": "group", "tasks": [null, null, null] })
    );
}

#[test]
fn test_wait_resumes_from_record() {
    let record: Option<TaskSyncRecord> =
        serde_json::from_value(json!({ "type": "wait", "duration": 500, "elapsed": 200 }))
            .expect("record decodes");

    let mut task =
        AsyncTask::from_sync_record(record.as_ref(), &mut ignore_resolver).expect("valid record");
    assert!(!task.poll(&FrameTime(299.0)));
    assert!(task.poll(&FrameTime(1.0)));
}

#[test]
fn test_nested_groups_keep_their_shape() {
    let inner = TaskGroup::with_tasks([WaitTask::new(10.0).into(), WaitTask::new(20.0).into()]);
    let outer = AsyncTask::from(TaskGroup::with_tasks([
        inner.into(),
        WaitTask::new(30.0).into(),
        ManuallyResolvableTask::new().into(),
    ]));

    let record = outer.to_sync_record().expect("groups are resumable");
    assert_eq!(record.count(), 6);

    let mut unresumable = Vec::new();
    let restored = AsyncTask::from_sync_record(Some(&record), &mut |resolver: TaskResolver| {
        unresumable.push(resolver)
    })
    .expect("valid record");

    assert_eq!(restored.to_sync_record(), Some(record));
    assert_eq!(unresumable.len(), 1);

    let AsyncTask::Group(group) = &restored else {
        panic!("expected a group, got {}", restored.kind());
    };
    assert_eq!(group.len(), 3);
    assert!(matches!(&group.tasks()[0], AsyncTask::Group(inner) if inner.len() == 2));
}

#[test]
fn test_null_record_restores_as_pending() {
    let mut resolvers = Vec::new();
    let mut task = AsyncTask::from_sync_record(None, &mut |resolver: TaskResolver| resolvers.push(resolver))
        .expect("null records are valid");

    assert!(!task.poll(&FrameTime(1_000_000.0)));
    resolvers.pop().expect("one resolver handed out").resolve();
    assert!(task.poll(&FrameTime(0.0)));
}

#[test]
fn test_unknown_type_is_rejected() {
    let result: Result<Option<TaskSyncRecord>, _> =
        serde_json::from_value(json!({ "type": "tween", "duration": 1 }));
    assert!(result.is_err());
}

#[test]
fn test_invalid_wait_values_are_rejected() {
    let record = TaskSyncRecord::Wait {
        duration: -1.0,
        elapsed: 0.0,
    };
    let err = AsyncTask::from_sync_record(Some(&record), &mut ignore_resolver)
        .expect_err("negative durations are invalid");
    assert!(matches!(err, TaskSyncError::InvalidWait { .. }));
}

#[test]
fn test_restore_in_place() {
    let mut wait = AsyncTask::from(WaitTask::new(100.0));
    let record = TaskSyncRecord::Wait {
        duration: 100.0,
        elapsed: 90.0,
    };
    wait.restore_from_sync_record(Some(&record), &mut ignore_resolver)
        .expect("same kind");
    assert!(wait.poll(&FrameTime(10.0)));

    let mut group = AsyncTask::from(TaskGroup::new());
    let err = group
        .restore_from_sync_record(Some(&record), &mut ignore_resolver)
        .expect_err("a group cannot take a wait record");
    assert_eq!(
        err,
        TaskSyncError::KindMismatch {
            task: "group",
            record: "wait"
        }
    );
}
