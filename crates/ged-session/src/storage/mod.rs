//! Backends for [`KeyValueStore`](ged_core::traits::storage::KeyValueStore).

pub mod file;
pub mod memory;

use std::sync::Arc;

use ged_core::config::{SessionConfig, SessionStorageKind};
use ged_core::result::AppResult;
use ged_core::traits::storage::KeyValueStore;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Build the backend selected by configuration.
pub async fn from_config(config: &SessionConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    let backend: Arc<dyn KeyValueStore> = match config.storage {
        SessionStorageKind::Memory => Arc::new(MemoryStorage::new()),
        SessionStorageKind::File => Arc::new(FileStorage::open(&config.path).await?),
    };
    Ok(backend)
}
