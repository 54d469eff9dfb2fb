use super::completion::{CompletionBridge, Responder};
use crate::cache::{ActionKey, CacheError, RequestContext};
use crate::instances::{InstanceName, InstanceRouter};
use crate::stats::OnRequest;
use crate::util::format_digest;
use re_grpc_proto::build::bazel::remote::execution::v2::{
    action_cache_server::ActionCache, ActionResult, Digest, GetActionResultRequest,
    UpdateActionResultRequest,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};

pub struct ActionCacheService {
    instances: Arc<dyn InstanceRouter>,
    on_request: OnRequest,
    shutdown: CancellationToken,
}

impl ActionCacheService {
    pub fn new(instances: Arc<dyn InstanceRouter>, on_request: OnRequest) -> Self {
        Self {
            instances,
            on_request,
            shutdown: CancellationToken::new(),
        }
    }

    /// Ties in-flight writes to service shutdown: cancelling `shutdown`
    /// interrupts every store that has not finished.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Dispatches a lookup and returns without waiting for it; the outcome is
    /// written to `responder` from whichever task completes the lookup.
    pub fn fetch_result(
        &self,
        request: GetActionResultRequest,
        ctx: RequestContext,
        responder: Responder,
    ) {
        let name = InstanceName::from_wire(&request.instance_name);

        let instance = match self.instances.resolve(&name) {
            Ok(instance) => instance,
            Err(e) => {
                tracing::debug!("GetActionResult: {}", e);
                let _ = responder.send(Err(e.into()));
                return;
            }
        };

        let key = match action_key(request.action_digest.as_ref()) {
            Ok(key) => key,
            Err(status) => {
                let _ = responder.send(Err(status));
                return;
            }
        };

        tracing::debug!("GetActionResult({}): {}", name, key);

        let digest = request
            .action_digest
            .as_ref()
            .map(format_digest)
            .unwrap_or_default();
        let bridge = CompletionBridge::new(responder, name.to_string(), digest);
        bridge.attach(instance.fetch(key, ctx));

        (self.on_request)();
    }

    /// Writes the result and echoes it back. If the write is interrupted the
    /// interruption is re-raised on `interrupt` and no response is sent.
    ///
    /// Only the caller that owns `interrupt` can observe the re-raise. The
    /// tonic adapter passes a per-call child of the shutdown token, so there
    /// the call simply closes as `CANCELLED`.
    pub async fn store_result(
        &self,
        request: UpdateActionResultRequest,
        interrupt: &CancellationToken,
        responder: Responder,
    ) {
        let name = InstanceName::from_wire(&request.instance_name);

        let instance = match self.instances.resolve(&name) {
            Ok(instance) => instance,
            Err(e) => {
                tracing::debug!("UpdateActionResult: {}", e);
                let _ = responder.send(Err(e.into()));
                return;
            }
        };

        let key = match action_key(request.action_digest.as_ref()) {
            Ok(key) => key,
            Err(status) => {
                let _ = responder.send(Err(status));
                return;
            }
        };

        let Some(action_result) = request.action_result else {
            let _ = responder.send(Err(Status::invalid_argument("Action result is required")));
            return;
        };

        tracing::debug!("UpdateActionResult({}): {}", name, key);

        match instance.store(&key, &action_result, interrupt).await {
            Ok(()) => {
                let _ = responder.send(Ok(action_result));
            }
            Err(CacheError::Interrupted) => {
                tracing::debug!("UpdateActionResult({}): {} interrupted", name, key);
                interrupt.cancel();
            }
            Err(e @ CacheError::UpdatesDisabled(_)) => {
                tracing::debug!("UpdateActionResult({}): {}", name, e);
                let _ = responder.send(Err(e.into()));
            }
            Err(e) => {
                tracing::warn!(
                    instance = %name,
                    digest = %key,
                    "UpdateActionResult failed: {:#}",
                    e
                );
                let _ = responder.send(Err(e.into()));
            }
        }
    }
}

fn action_key(digest: Option<&Digest>) -> Result<ActionKey, Status> {
    let digest = digest.ok_or_else(|| Status::invalid_argument("Action digest is required"))?;

    ActionKey::from_digest(digest)
        .map_err(|e| Status::invalid_argument(format!("Invalid action digest: {}", e)))
}

#[tonic::async_trait]
impl ActionCache for ActionCacheService {
    async fn get_action_result(
        &self,
        request: Request<GetActionResultRequest>,
    ) -> Result<Response<ActionResult>, Status> {
        // tonic drops this future when the client cancels or disconnects,
        // which cancels the lookup through the request context.
        let cancellation = CancellationToken::new();
        let _cancel_on_drop = cancellation.clone().drop_guard();

        let ctx = RequestContext::from_metadata(request.metadata(), cancellation);
        let (responder, handle) = Responder::channel();

        self.fetch_result(request.into_inner(), ctx, responder);

        handle.into_response().await
    }

    async fn update_action_result(
        &self,
        request: Request<UpdateActionResultRequest>,
    ) -> Result<Response<ActionResult>, Status> {
        let interrupt = self.shutdown.child_token();
        let (responder, handle) = Responder::channel();

        self.store_result(request.into_inner(), &interrupt, responder)
            .await;

        handle.into_response().await
    }
}
