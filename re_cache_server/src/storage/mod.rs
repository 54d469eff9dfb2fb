pub mod traits;
pub mod filesystem_action_cache;
pub mod memory_action_cache;

pub use traits::{ActionCacheStore, DynActionCacheStore};
pub use filesystem_action_cache::FileSystemActionCacheStore;
pub use memory_action_cache::MemoryActionCacheStore;

use crate::config::ActionCacheConfig;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

pub async fn create_action_cache_store(config: &ActionCacheConfig) -> Result<DynActionCacheStore> {
    match config {
        ActionCacheConfig::FileSystem { root_dir } => {
            let store = FileSystemActionCacheStore::new(root_dir.clone());
            store.init().await?;
            Ok(Arc::new(store))
        }
        ActionCacheConfig::Memory {
            max_entries,
            ttl_seconds,
        } => {
            let ttl = ttl_seconds.map(Duration::from_secs);
            Ok(Arc::new(MemoryActionCacheStore::new(*max_entries, ttl)))
        }
    }
}
