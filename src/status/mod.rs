//! Concurrent store of per-job provisioning status, keyed by short ID.

mod store;

pub use store::StatusMap;

use crate::tasks::types::{ContainerStatus, ShortId};

/// Readers get a cloned snapshot; writers to the same key are serialized.
pub trait StatusStore: Send + Sync {
    /// Inserts a new record. Returns `false` and leaves the store untouched
    /// when the key is already present.
    fn insert(&self, record: ContainerStatus) -> bool;

    fn get(&self, id: &ShortId) -> Option<ContainerStatus>;

    /// Atomically applies `mutator` to the record. Returns `false` when the
    /// key is absent.
    fn update(&self, id: &ShortId, mutator: &mut dyn FnMut(&mut ContainerStatus)) -> bool;

    fn delete(&self, id: &ShortId) -> Option<ContainerStatus>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
