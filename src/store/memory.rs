use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::backend::KeyValueStore;
use super::errors::StoreError;

// ============================================================================
// In-Memory Backend
// ============================================================================
//
// HashMap-backed store with Redis-like list semantics. No persistence
// across restarts; used by the test suite and `--store memory`.
//
// ============================================================================

#[derive(Default)]
struct MemoryState {
    values: HashMap<String, Vec<u8>>,
    lists: HashMap<String, Vec<String>>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let state = self.state.read().await;
        Ok(state.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn set_existing(&self, key: &str, value: &[u8]) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.values.get_mut(key) {
            Some(existing) => {
                *existing = value.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn append(&self, list_key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .lists
            .entry(list_key.to_string())
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    async fn range(&self, list_key: &str, start: u64, stop: u64) -> Result<Vec<String>, StoreError> {
        let state = self.state.read().await;
        let list = match state.lists.get(list_key) {
            Some(list) => list,
            None => return Ok(Vec::new()),
        };

        let len = list.len() as u64;
        if start >= len || start > stop {
            return Ok(Vec::new());
        }
        let stop = stop.min(len - 1);

        Ok(list[start as usize..=stop as usize].to_vec())
    }

    async fn length(&self, list_key: &str) -> Result<u64, StoreError> {
        let state = self.state.read().await;
        Ok(state.lists.get(list_key).map_or(0, |list| list.len() as u64))
    }

    async fn set_and_append(
        &self,
        key: &str,
        value: &[u8],
        list_key: &str,
        list_value: &str,
    ) -> Result<(), StoreError> {
        // One write guard covers both mutations
        let mut state = self.state.write().await;
        state.values.insert(key.to_string(), value.to_vec());
        state
            .lists
            .entry(list_key.to_string())
            .or_default()
            .push(list_value.to_string());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
