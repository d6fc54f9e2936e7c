//! Process-shared registry of in-flight demo allocations.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

/// A registered buffer.
///
/// Each buffer carries its own lock so a request's touch task works on the
/// bytes without holding the registry map lock.
pub type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// Registry of in-flight demo allocations, keyed by request id.
///
/// Clonable: every clone shares the same map, giving handlers one
/// process-wide view while tests construct isolated instances.
#[derive(Clone, Default)]
pub struct AllocationRegistry {
    entries: Arc<RwLock<HashMap<String, SharedBuffer>>>,
}

impl AllocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a buffer and return the active-entry count including it.
    ///
    /// Insert and count happen under one write lock, so the returned
    /// snapshot is consistent with a serialization of concurrent inserts.
    pub async fn insert(&self, request_id: &str, buffer: SharedBuffer) -> usize {
        let mut entries = self.entries.write().await;
        entries.insert(request_id.to_string(), buffer);
        entries.len()
    }

    /// Remove an entry. Returns whether it was present.
    pub async fn remove(&self, request_id: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries.remove(request_id).is_some()
    }

    /// Count of active allocations.
    pub async fn active(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether a request id is currently registered.
    pub async fn contains(&self, request_id: &str) -> bool {
        self.entries.read().await.contains_key(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(bytes: usize) -> SharedBuffer {
        Arc::new(Mutex::new(vec![0u8; bytes]))
    }

    #[tokio::test]
    async fn insert_returns_count_including_self() {
        let registry = AllocationRegistry::new();

        assert_eq!(registry.insert("a", buffer(8)).await, 1);
        assert_eq!(registry.insert("b", buffer(8)).await, 2);
        assert_eq!(registry.active().await, 2);
        assert!(registry.contains("a").await);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let registry = AllocationRegistry::new();
        registry.insert("a", buffer(8)).await;

        assert!(registry.remove("a").await);
        assert!(!registry.remove("a").await);
        assert_eq!(registry.active().await, 0);
    }

    #[tokio::test]
    async fn clones_share_the_same_map() {
        let registry = AllocationRegistry::new();
        let view = registry.clone();

        registry.insert("a", buffer(8)).await;
        assert_eq!(view.active().await, 1);

        view.remove("a").await;
        assert_eq!(registry.active().await, 0);
    }

    #[tokio::test]
    async fn reinserting_a_key_does_not_grow_the_map() {
        let registry = AllocationRegistry::new();
        registry.insert("a", buffer(8)).await;
        assert_eq!(registry.insert("a", buffer(8)).await, 1);
    }
}
