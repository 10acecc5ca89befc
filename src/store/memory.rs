use movies_error::AppResult;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Item, MovieStore, WriteOutcome};

/// In-memory implementation of MovieStore
///
/// Conditional operations hold the write lock across check and write, which
/// gives them the same atomicity the Redis scripts provide.
#[derive(Default)]
pub struct InMemoryStore {
    items: RwLock<HashMap<String, Item>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl MovieStore for InMemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<Item>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn put_if_absent(&self, key: &str, item: &Item) -> AppResult<WriteOutcome> {
        let mut items = self.items.write().await;
        if items.contains_key(key) {
            return Ok(WriteOutcome::ConditionFailed);
        }
        items.insert(key.to_string(), item.clone());
        Ok(WriteOutcome::Applied)
    }

    async fn put_if_present(&self, key: &str, item: &Item) -> AppResult<WriteOutcome> {
        let mut items = self.items.write().await;
        match items.get_mut(key) {
            Some(existing) => {
                *existing = item.clone();
                Ok(WriteOutcome::Applied)
            }
            None => Ok(WriteOutcome::ConditionFailed),
        }
    }

    async fn delete_if_present(&self, key: &str) -> AppResult<WriteOutcome> {
        Ok(match self.items.write().await.remove(key) {
            Some(_) => WriteOutcome::Applied,
            None => WriteOutcome::ConditionFailed,
        })
    }
}
