use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;

/// Stable identifier of a scene object.
///
/// Unlike arena keys, an `ObjectId` survives serialization: two peers that
/// share a scene agree on the ids of the objects they both know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A simulation object as seen by deferred game logic.
///
/// Objects are shared as `Rc<SceneObject>`. The scene drops its own reference
/// when the object is removed, but anything else holding the `Rc` (a
/// [`LongLivedObjects`](crate::LongLivedObjects) list, typically) keeps it
/// readable and writable.
pub struct SceneObject {
    id: ObjectId,
    name: String,
    variables: RefCell<FxHashMap<String, f64>>,
    destroyed: Cell<bool>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, id: ObjectId) -> Self {
        Self {
            id,
            name: name.into(),
            variables: RefCell::new(FxHashMap::default()),
            destroyed: Cell::new(false),
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// The object name (its "type" in the scene), used to group objects in lists.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable(&self, name: &str) -> f64 {
        self.variables.borrow().get(name).copied().unwrap_or(0.0)
    }

    pub fn set_variable(&self, name: &str, value: f64) {
        self.variables.borrow_mut().insert(name.to_string(), value);
    }

    pub fn add_to_variable(&self, name: &str, delta: f64) {
        let mut variables = self.variables.borrow_mut();
        *variables.entry(name.to_string()).or_insert(0.0) += delta;
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.borrow().contains_key(name)
    }

    /// True once the object was removed from its scene.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub(crate) fn mark_destroyed(&self) {
        self.destroyed.set(true);
    }
}

impl fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("destroyed", &self.destroyed.get())
            .finish()
    }
}
