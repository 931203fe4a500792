// src/services/store.rs
use tokio::sync::RwLock;

/// Insertion-ordered in-memory collection.
///
/// Reads hand out a cloned snapshot so callers never hold the lock while
/// filtering or paging.
pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Clone + Send + Sync> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an item from the current contents and append it, under one
    /// write lock.
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(&[T]) -> T,
    {
        let mut items = self.items.write().await;
        let item = build(items.as_slice());
        items.push(item.clone());
        item
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.read().await.iter().find(|item| predicate(item)).cloned()
    }
}
