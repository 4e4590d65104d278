use dashmap::{DashMap, mapref::entry::Entry};

use super::StatusStore;
use crate::tasks::types::{ContainerStatus, ShortId};

#[derive(Debug, Default)]
pub struct StatusMap {
    statuses: DashMap<ShortId, ContainerStatus>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusStore for StatusMap {
    fn insert(&self, record: ContainerStatus) -> bool {
        match self.statuses.entry(record.short_id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    fn get(&self, id: &ShortId) -> Option<ContainerStatus> {
        self.statuses.get(id).map(|entry| entry.value().clone())
    }

    fn update(&self, id: &ShortId, mutator: &mut dyn FnMut(&mut ContainerStatus)) -> bool {
        match self.statuses.get_mut(id) {
            Some(mut entry) => {
                mutator(entry.value_mut());
                true
            }
            None => false,
        }
    }

    fn delete(&self, id: &ShortId) -> Option<ContainerStatus> {
        self.statuses.remove(id).map(|(_, record)| record)
    }

    fn len(&self) -> usize {
        self.statuses.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tasks::types::State;

    fn id(value: &str) -> ShortId {
        ShortId::parse(value).unwrap()
    }

    #[test]
    fn get_on_absent_key_is_none() {
        let store = StatusMap::new();
        assert!(store.get(&id("000000000000")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn insert_refuses_to_overwrite() {
        let store = StatusMap::new();
        let key = id("abc123def456");
        assert!(store.insert(ContainerStatus::initializing(key.clone())));

        let mut other = ContainerStatus::initializing(key.clone());
        other.message = "second".to_string();
        assert!(!store.insert(other));
        assert_eq!(store.get(&key).unwrap().message, "Starting container creation");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_mutates_in_place_and_reports_absence() {
        let store = StatusMap::new();
        let key = id("abc123def456");
        store.insert(ContainerStatus::initializing(key.clone()));

        assert!(store.update(&key, &mut |record| record.status = State::Ready));
        assert_eq!(store.get(&key).unwrap().status, State::Ready);
        assert!(!store.update(&id("ffffffffffff"), &mut |_| {}));
    }

    #[test]
    fn delete_returns_removed_record() {
        let store = StatusMap::new();
        let key = id("abc123def456");
        store.insert(ContainerStatus::initializing(key.clone()));

        assert_eq!(store.delete(&key).unwrap().short_id, key);
        assert!(store.get(&key).is_none());
        assert!(store.delete(&key).is_none());
    }

    #[test]
    fn concurrent_updates_to_one_key_are_serialized() {
        let store = Arc::new(StatusMap::new());
        let key = id("abc123def456");
        store.insert(ContainerStatus::initializing(key.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let key = key.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        store.update(&key, &mut |record| record.message.push('x'));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let message = store.get(&key).unwrap().message;
        assert_eq!(message.len(), "Starting container creation".len() + 2000);
    }
}
