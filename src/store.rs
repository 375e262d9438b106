//! Global Application State Store
//!
//! Two pieces live here: the `reactive_stores` `AppState` with field-level
//! reactivity for data shared across pages, and the localStorage-backed
//! `VisitQueue` holding the ids of children still awaiting a visit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{AcademicYear, Child, ChildId, ClassRoom};

/// Storage slot for the pending-visit queue, kept distinct from any other
/// application key.
pub const QUEUE_STORAGE_KEY: &str = "outreach_visit_queue";

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All children, loaded lazily by the pages that need the full list
    pub children: Vec<Child>,
    /// All classes
    pub classes: Vec<ClassRoom>,
    /// All academic years
    pub academic_years: Vec<AcademicYear>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Queue Store
// ========================

/// Durable string-keyed slot the queue persists into.
///
/// Both implementations degrade instead of failing: a broken backend reads as
/// absent and reports writes as unsuccessful. Losing the queue must never
/// take the rest of the app down with it.
pub trait QueueBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// `window.localStorage` backend.
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl QueueBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn write(&self, key: &str, value: &str) -> bool {
        Self::storage().is_some_and(|s| s.set_item(key, value).is_ok())
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage().is_some_and(|s| s.remove_item(key).is_ok())
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
}

impl QueueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> bool {
        self.slots
            .lock()
            .map(|mut slots| {
                slots.insert(key.to_string(), value.to_string());
            })
            .is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        self.slots
            .lock()
            .map(|mut slots| {
                slots.remove(key);
            })
            .is_ok()
    }
}

/// Pending-visit queue: an ordered, duplicate-free list of child ids in one
/// storage slot, serialized as a JSON array of integers.
///
/// Every mutation is a full read-modify-write. Malformed or unreadable slot
/// contents read as an empty queue rather than an error.
#[derive(Clone)]
pub struct VisitQueue {
    backend: Arc<dyn QueueBackend>,
}

impl VisitQueue {
    pub fn new(backend: Arc<dyn QueueBackend>) -> Self {
        Self { backend }
    }

    pub fn local_storage() -> Self {
        Self::new(Arc::new(LocalStorageBackend))
    }

    /// Queued ids in insertion order. Absent or corrupt slot reads as empty.
    pub fn list(&self) -> Vec<ChildId> {
        let Some(raw) = self.backend.read(QUEUE_STORAGE_KEY) else {
            return Vec::new();
        };
        serde_json::from_str::<Vec<u32>>(&raw)
            .map(|ids| ids.into_iter().map(ChildId).collect())
            .unwrap_or_default()
    }

    /// Append `id` if not already queued. Returns whether it was newly added;
    /// `false` covers both duplicates and failed writes.
    pub fn add(&self, id: ChildId) -> bool {
        let mut ids = self.list();
        if ids.contains(&id) {
            return false;
        }
        ids.push(id);
        self.persist(&ids)
    }

    /// Remove every occurrence of `id`. Returns whether the write went
    /// through, not whether the id was present.
    pub fn remove(&self, id: ChildId) -> bool {
        let mut ids = self.list();
        ids.retain(|queued| *queued != id);
        self.persist(&ids)
    }

    pub fn contains(&self, id: ChildId) -> bool {
        self.list().contains(&id)
    }

    pub fn clear(&self) {
        self.backend.delete(QUEUE_STORAGE_KEY);
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }

    fn persist(&self, ids: &[ChildId]) -> bool {
        let raw: Vec<u32> = ids.iter().map(|id| id.0).collect();
        match serde_json::to_string(&raw) {
            Ok(json) => self.backend.write(QUEUE_STORAGE_KEY, &json),
            Err(_) => false,
        }
    }
}

/// Get the visit queue from context
pub fn use_visit_queue() -> VisitQueue {
    expect_context::<VisitQueue>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_queue() -> (VisitQueue, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::default());
        (VisitQueue::new(backend.clone()), backend)
    }

    #[test]
    fn add_is_idempotent() {
        let (queue, _) = memory_queue();
        assert!(queue.add(ChildId(7)));
        assert!(!queue.add(ChildId(7)));
        assert_eq!(queue.list(), vec![ChildId(7)]);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let (queue, _) = memory_queue();
        queue.add(ChildId(3));
        queue.add(ChildId(17));
        queue.add(ChildId(42));
        assert_eq!(queue.list(), vec![ChildId(3), ChildId(17), ChildId(42)]);
    }

    #[test]
    fn remove_by_parsed_string_id() {
        // "7" from a form value and 7 from the API are the same identifier
        // once both pass through ChildId.
        let (queue, _) = memory_queue();
        queue.add(ChildId(7));
        let from_form: ChildId = "7".parse().unwrap();
        assert!(queue.remove(from_form));
        assert!(!queue.contains(ChildId(7)));
    }

    #[test]
    fn remove_of_absent_id_still_writes() {
        let (queue, backend) = memory_queue();
        queue.add(ChildId(1));
        assert!(queue.remove(ChildId(99)));
        assert_eq!(queue.list(), vec![ChildId(1)]);
        assert!(backend.read(QUEUE_STORAGE_KEY).is_some());
    }

    #[test]
    fn malformed_slot_reads_as_empty() {
        let (queue, backend) = memory_queue();
        backend.write(QUEUE_STORAGE_KEY, "{not json");
        assert!(queue.list().is_empty());
        assert_eq!(queue.count(), 0);

        backend.write(QUEUE_STORAGE_KEY, "\"a string\"");
        assert!(queue.list().is_empty());
    }

    #[test]
    fn mutation_replaces_corrupt_slot() {
        let (queue, backend) = memory_queue();
        backend.write(QUEUE_STORAGE_KEY, "[1, \"x\"]");
        assert!(queue.add(ChildId(5)));
        assert_eq!(queue.list(), vec![ChildId(5)]);
    }

    #[test]
    fn clear_and_count() {
        let (queue, _) = memory_queue();
        queue.add(ChildId(1));
        queue.add(ChildId(2));
        assert_eq!(queue.count(), 2);
        queue.clear();
        assert_eq!(queue.count(), 0);
        assert!(queue.list().is_empty());
    }

    struct BrokenBackend;

    impl QueueBackend for BrokenBackend {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }
        fn write(&self, _key: &str, _value: &str) -> bool {
            false
        }
        fn delete(&self, _key: &str) -> bool {
            false
        }
    }

    #[test]
    fn broken_backend_degrades_to_noops() {
        let queue = VisitQueue::new(Arc::new(BrokenBackend));
        assert!(queue.list().is_empty());
        assert!(!queue.add(ChildId(1)));
        assert!(!queue.remove(ChildId(1)));
        assert!(!queue.contains(ChildId(1)));
        queue.clear();
    }
}
