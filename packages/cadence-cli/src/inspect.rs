use cadence_core::scheduler::SyncSnapshot;
use cadence_core::tasks::TaskSyncRecord;

/// Human-readable listing of `snapshot`, one block per entry.
pub fn describe(snapshot: &SyncSnapshot) -> String {
    let mut out = format!("{} pending tasks\n", snapshot.len());
    for (index, entry) in snapshot.tasks.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", index, entry.callback_identifier));
        describe_record(&mut out, entry.task.as_ref(), 2);
        if !entry.objects.ids.is_empty() {
            let ids: Vec<&str> = entry.objects.ids.iter().map(|id| id.as_str()).collect();
            out.push_str(&format!("  objects: {}\n", ids.join(", ")));
        }
    }
    out
}

fn describe_record(out: &mut String, record: Option<&TaskSyncRecord>, indent: usize) {
    let pad = " ".repeat(indent);
    match record {
        None => out.push_str(&format!("{}not resumable\n", pad)),
        Some(TaskSyncRecord::Wait { duration, elapsed }) => {
            out.push_str(&format!("{}wait {}/{} ms\n", pad, elapsed, duration));
        }
        Some(TaskSyncRecord::Group { tasks }) => {
            out.push_str(&format!("{}group of {}\n", pad, tasks.len()));
            for task in tasks {
                describe_record(out, task.as_ref(), indent + 2);
            }
        }
    }
}
