use crate::object::{ObjectId, SceneObject};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::rc::Rc;

new_key_type! {
    pub struct ObjectKey;
}

/// Resolves a stable object id back to a live object.
pub trait ObjectResolver {
    fn resolve_object(&self, id: &ObjectId) -> Option<Rc<SceneObject>>;
}

/// The scene-level owner of objects.
///
/// Objects live in an arena; the id index maps network-stable ids to arena keys.
#[derive(Default)]
pub struct ObjectStore {
    objects: SlotMap<ObjectKey, Rc<SceneObject>>,
    index: FxHashMap<ObjectId, ObjectKey>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an object. An object already registered under `id` is replaced
    /// (and marked destroyed).
    pub fn create(&mut self, name: impl Into<String>, id: impl Into<ObjectId>) -> Rc<SceneObject> {
        let id = id.into();
        if self.index.contains_key(&id) {
            tracing::warn!("Object id {} reused, replacing the previous object", id);
            self.remove(&id);
        }

        let object = Rc::new(SceneObject::new(name, id.clone()));
        let key = self.objects.insert(object.clone());
        self.index.insert(id, key);
        object
    }

    pub fn get(&self, id: &ObjectId) -> Option<Rc<SceneObject>> {
        self.index
            .get(id)
            .and_then(|&key| self.objects.get(key))
            .cloned()
    }

    /// Removes an object from the scene and marks it destroyed.
    ///
    /// The store gives up its reference; the returned `Rc` (and any other
    /// holder) keeps the object alive.
    pub fn remove(&mut self, id: &ObjectId) -> Option<Rc<SceneObject>> {
        let key = self.index.remove(id)?;
        let object = self.objects.remove(key)?;
        object.mark_destroyed();
        tracing::debug!("Removed object {} ({})", object.id(), object.name());
        Some(object)
    }

    /// Live objects with the given name, in arena order.
    pub fn objects_named(&self, name: &str) -> Vec<Rc<SceneObject>> {
        self.objects
            .values()
            .filter(|object| object.name() == name)
            .cloned()
            .collect()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every object, marking each destroyed.
    pub fn clear(&mut self) {
        for object in self.objects.values() {
            object.mark_destroyed();
        }
        self.objects.clear();
        self.index.clear();
    }
}

impl ObjectResolver for ObjectStore {
    fn resolve_object(&self, id: &ObjectId) -> Option<Rc<SceneObject>> {
        self.get(id)
    }
}
