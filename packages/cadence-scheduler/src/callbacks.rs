use cadence_objects::LongLivedObjects;
use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;

/// Continuation run once, when its task finished.
pub type TaskCallback<C> = Box<dyn FnOnce(&mut C, &LongLivedObjects)>;

/// Continuation registered under a callback identifier, reusable across restores.
pub type SharedTaskCallback<C> = Rc<dyn Fn(&mut C, &LongLivedObjects)>;

/// Maps callback identifiers to the continuations a restoring process knows.
///
/// Snapshots only carry identifiers; restoring re-binds each entry through
/// this table.
pub struct CallbackTable<C> {
    callbacks: FxHashMap<String, SharedTaskCallback<C>>,
}

impl<C> Default for CallbackTable<C> {
    fn default() -> Self {
        Self {
            callbacks: FxHashMap::default(),
        }
    }
}

impl<C> CallbackTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` under `id`, replacing any previous one.
    pub fn register<F>(&mut self, id: impl Into<String>, callback: F)
    where
        F: Fn(&mut C, &LongLivedObjects) + 'static,
    {
        self.callbacks.insert(id.into(), Rc::new(callback));
    }

    pub fn with<F>(mut self, id: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut C, &LongLivedObjects) + 'static,
    {
        self.register(id, callback);
        self
    }

    pub fn get(&self, id: &str) -> Option<&SharedTaskCallback<C>> {
        self.callbacks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.callbacks.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<SharedTaskCallback<C>> {
        self.callbacks.remove(id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<C> fmt::Debug for CallbackTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.callbacks.keys().collect();
        ids.sort();
        f.debug_struct("CallbackTable").field("ids", &ids).finish()
    }
}
