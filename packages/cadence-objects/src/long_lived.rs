use crate::object::{ObjectId, SceneObject};
use crate::store::ObjectResolver;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

type ObjectList = SmallVec<[Rc<SceneObject>; 4]>;

/// Object lists that outlive the frame they were built in.
///
/// A deferred callback usually needs the objects that were picked when its
/// task was issued. The scene frees removed objects right away, so the
/// callback's objects are kept here as strong references, grouped by object
/// name. Removing an object from the scene does not remove it from these
/// lists; use [`SceneObject::is_destroyed`] to observe removal.
///
/// A list can inherit from a parent: `objects(name)` falls back to the parent
/// when no list for `name` was saved here.
#[derive(Default, Clone)]
pub struct LongLivedObjects {
    lists: BTreeMap<String, ObjectList>,
    parent: Option<Rc<LongLivedObjects>>,
}

/// Serialized form: the ordered ids of every held object.
///
/// List names are not carried. On restore each object goes back into the list
/// named after its [`SceneObject::name`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LongLivedObjectsSyncData {
    pub ids: Vec<ObjectId>,
}

impl LongLivedObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parent(parent: Rc<LongLivedObjects>) -> Self {
        Self {
            lists: BTreeMap::new(),
            parent: Some(parent),
        }
    }

    /// Saves `object` in the list `list_name`. Adding the same object twice is a no-op.
    pub fn add_object(&mut self, list_name: impl Into<String>, object: Rc<SceneObject>) {
        let list = self.lists.entry(list_name.into()).or_default();
        if list.iter().any(|existing| Rc::ptr_eq(existing, &object)) {
            return;
        }
        list.push(object);
    }

    pub fn with_object(mut self, list_name: impl Into<String>, object: Rc<SceneObject>) -> Self {
        self.add_object(list_name, object);
        self
    }

    pub fn objects(&self, list_name: &str) -> &[Rc<SceneObject>] {
        match self.lists.get(list_name) {
            Some(list) => list.as_slice(),
            None => self
                .parent
                .as_deref()
                .map(|parent| parent.objects(list_name))
                .unwrap_or(&[]),
        }
    }

    /// Finds a held object by its stable id.
    pub fn get_object(&self, id: &ObjectId) -> Option<Rc<SceneObject>> {
        self.effective_lists()
            .into_iter()
            .flat_map(|(_, list)| list.iter())
            .find(|object| object.id() == id)
            .cloned()
    }

    /// Ids of every held object, grouped by list name in name order.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.effective_lists()
            .into_iter()
            .flat_map(|(_, list)| list.iter().map(|object| object.id().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.effective_lists()
            .into_iter()
            .map(|(_, list)| list.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_sync_data(&self) -> LongLivedObjectsSyncData {
        let mut ids = self.object_ids();
        let mut seen = BTreeSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        LongLivedObjectsSyncData { ids }
    }

    /// Rebuilds the lists by resolving every id against `resolver` and
    /// grouping the objects by name.
    ///
    /// Ids that no longer resolve are skipped. The result has no parent: the
    /// sync data already carries the inherited objects.
    pub fn from_sync_data(data: &LongLivedObjectsSyncData, resolver: &dyn ObjectResolver) -> Self {
        let mut objects = Self::new();
        for id in &data.ids {
            match resolver.resolve_object(id) {
                Some(object) => {
                    let name = object.name().to_string();
                    objects.add_object(name, object);
                }
                None => tracing::warn!("Object {} could not be resolved", id),
            }
        }
        objects
    }

    /// Own lists, plus inherited lists for names not saved here.
    fn effective_lists(&self) -> BTreeMap<&str, &ObjectList> {
        let mut lists: BTreeMap<&str, &ObjectList> = match self.parent.as_deref() {
            Some(parent) => parent.effective_lists(),
            None => BTreeMap::new(),
        };
        for (name, list) in &self.lists {
            lists.insert(name.as_str(), list);
        }
        lists
    }
}

impl std::fmt::Debug for LongLivedObjects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongLivedObjects")
            .field("ids", &self.to_sync_data().ids)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
