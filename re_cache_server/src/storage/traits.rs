use crate::cache::ActionKey;
use anyhow::Result;
use async_trait::async_trait;
use re_grpc_proto::build::bazel::remote::execution::v2::ActionResult;
use std::sync::Arc;

/// Persistence behind one instance's action cache.
///
/// Implementations must be safe for concurrent use: the service calls them
/// from many requests at once without any locking of its own.
#[async_trait]
pub trait ActionCacheStore: Send + Sync {
    async fn get_action_result(&self, key: &ActionKey) -> Result<Option<ActionResult>>;

    /// Replaces any existing entry for `key`. Readers observe either the old
    /// or the new value, never a partial write.
    async fn put_action_result(&self, key: &ActionKey, result: &ActionResult) -> Result<()>;

    /// Marks an entry as recently used, for stores with external expiry.
    async fn touch_action_result(&self, key: &ActionKey) -> Result<()>;
}

pub type DynActionCacheStore = Arc<dyn ActionCacheStore>;
