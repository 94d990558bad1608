pub mod long_lived;
pub mod object;
pub mod store;

pub use long_lived::{LongLivedObjects, LongLivedObjectsSyncData};
pub use object::{ObjectId, SceneObject};
pub use store::{ObjectKey, ObjectResolver, ObjectStore};
