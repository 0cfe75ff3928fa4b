//! Key/value storage trait for persisted client state.

use async_trait::async_trait;

use crate::result::AppResult;

/// A string-keyed, string-valued persistent store.
///
/// This is the client's equivalent of browser local storage: the session
/// layer keeps the login payload, bearer token, active company selector,
/// and UI preferences in it. Implementations decide where the data lives.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key is absent.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove every key.
    async fn clear(&self) -> AppResult<()>;

    /// Remove several keys.
    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
