//! Process-local storage, used by tests and `storage = "memory"`.

use async_trait::async_trait;
use dashmap::DashMap;

use ged_core::result::AppResult;
use ged_core::traits::storage::KeyValueStore;

/// Volatile key/value storage backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStorage::new();
        store.set("token", "abc").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), Some("abc".to_string()));

        store.remove("token").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);
        store.remove("token").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_many_and_clear() {
        let store = MemoryStorage::new();
        for key in ["a", "b", "c"] {
            store.set(key, "1").await.unwrap();
        }
        store.remove_many(&["a", "b"]).await.unwrap();
        assert_eq!(store.len(), 1);

        store.clear().await.unwrap();
        assert!(store.is_empty());
    }
}
