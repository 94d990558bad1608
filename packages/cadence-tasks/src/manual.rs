use std::cell::Cell;
use std::rc::Rc;

/// Finishes once someone calls [`TaskResolver::resolve`].
///
/// Used for continuations resolved by another event or a platform callback
/// running on the simulation thread.
#[derive(Debug, Clone, Default)]
pub struct ManuallyResolvableTask {
    resolved: Rc<Cell<bool>>,
}

/// Handle resolving a [`ManuallyResolvableTask`] from outside the polling cycle.
#[derive(Debug, Clone)]
pub struct TaskResolver {
    resolved: Rc<Cell<bool>>,
}

impl ManuallyResolvableTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolver(&self) -> TaskResolver {
        TaskResolver {
            resolved: self.resolved.clone(),
        }
    }

    pub fn resolve(&self) {
        self.resolved.set(true);
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get()
    }

    pub fn poll(&self) -> bool {
        self.is_resolved()
    }
}

impl TaskResolver {
    pub fn resolve(&self) {
        self.resolved.set(true);
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get()
    }
}

/// An already completed continuation.
///
/// Lets call sites append a task even when the action finished synchronously.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveTask;

impl ResolveTask {
    pub fn poll(&self) -> bool {
        true
    }
}
