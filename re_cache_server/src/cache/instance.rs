use super::context::RequestContext;
use super::error::CacheError;
use super::key::ActionKey;
use super::pending::PendingFetch;
use crate::instances::InstanceName;
use crate::storage::DynActionCacheStore;
use async_trait::async_trait;
use re_grpc_proto::build::bazel::remote::execution::v2::ActionResult;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// A tenant's action cache as seen by the RPC layer.
#[async_trait]
pub trait Instance: Send + Sync {
    fn name(&self) -> &InstanceName;

    /// Starts a lookup and returns without waiting for it.
    fn fetch(&self, key: ActionKey, ctx: RequestContext) -> PendingFetch;

    /// Writes `result` under `key`, replacing any previous entry. Resolves to
    /// [`CacheError::Interrupted`] once `interrupt` fires.
    async fn store(
        &self,
        key: &ActionKey,
        result: &ActionResult,
        interrupt: &CancellationToken,
    ) -> Result<(), CacheError>;
}

pub type DynInstance = Arc<dyn Instance>;

/// [`Instance`] backed by an [`ActionCacheStore`](crate::storage::ActionCacheStore).
/// Lookups run as tasks on the runtime the instance was built on.
pub struct CacheInstance {
    name: InstanceName,
    cache_store: DynActionCacheStore,
    allow_updates: bool,
    runtime: Handle,
}

impl CacheInstance {
    pub fn new(name: InstanceName, cache_store: DynActionCacheStore, runtime: Handle) -> Self {
        Self {
            name,
            cache_store,
            allow_updates: true,
            runtime,
        }
    }

    pub fn with_updates_allowed(mut self, allow_updates: bool) -> Self {
        self.allow_updates = allow_updates;
        self
    }
}

#[async_trait]
impl Instance for CacheInstance {
    fn name(&self) -> &InstanceName {
        &self.name
    }

    fn fetch(&self, key: ActionKey, ctx: RequestContext) -> PendingFetch {
        let (completer, pending) = PendingFetch::channel();
        let cache_store = self.cache_store.clone();

        let span = tracing::debug_span!(
            "fetch",
            instance = %self.name,
            digest = %key,
            tool_invocation_id = ctx.tool_invocation_id(),
            action_id = ctx.action_id(),
        );

        self.runtime.spawn(
            async move {
                let outcome = tokio::select! {
                    biased;
                    _ = ctx.cancelled() => Err(CacheError::Cancelled),
                    found = cache_store.get_action_result(&key) => found.map_err(CacheError::from),
                };

                let hit = matches!(outcome, Ok(Some(_)));
                completer.complete(outcome);

                if hit {
                    if let Err(e) = cache_store.touch_action_result(&key).await {
                        tracing::debug!("Failed to touch action result: {:#}", e);
                    }
                }
            }
            .instrument(span),
        );

        pending
    }

    async fn store(
        &self,
        key: &ActionKey,
        result: &ActionResult,
        interrupt: &CancellationToken,
    ) -> Result<(), CacheError> {
        if !self.allow_updates {
            return Err(CacheError::UpdatesDisabled(self.name.to_string()));
        }

        tokio::select! {
            biased;
            _ = interrupt.cancelled() => Err(CacheError::Interrupted),
            written = self.cache_store.put_action_result(key, result) => {
                written.map_err(CacheError::from)
            }
        }
    }
}
