use super::traits::ActionCacheStore;
use crate::cache::ActionKey;
use anyhow::Result;
use async_trait::async_trait;
use moka::future::Cache;
use re_grpc_proto::build::bazel::remote::execution::v2::ActionResult;
use std::sync::Arc;
use std::time::Duration;

/// Bounded in-memory action cache. Entries past `max_entries` are evicted by
/// moka's TinyLFU policy; `ttl` bounds how long any entry lives.
pub struct MemoryActionCacheStore {
    cache: Cache<ActionKey, Arc<ActionResult>>,
}

impl MemoryActionCacheStore {
    pub fn new(max_entries: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_entries);

        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl ActionCacheStore for MemoryActionCacheStore {
    async fn get_action_result(&self, key: &ActionKey) -> Result<Option<ActionResult>> {
        Ok(self.cache.get(key).await.map(|r| r.as_ref().clone()))
    }

    async fn put_action_result(&self, key: &ActionKey, result: &ActionResult) -> Result<()> {
        self.cache.insert(key.clone(), Arc::new(result.clone())).await;
        Ok(())
    }

    async fn touch_action_result(&self, _key: &ActionKey) -> Result<()> {
        // Reads already feed moka's frequency sketch.
        Ok(())
    }
}
