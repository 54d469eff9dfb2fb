//! Delivery of asynchronous lookups onto a unary call.
//!
//! A lookup is dispatched, then a [`CompletionBridge`] waits for its outcome
//! off the request path and writes exactly one terminal response (result,
//! not-found or error) into the call's [`Responder`]. Client cancellation is
//! absorbed silently: nothing is sent and nothing is logged above debug.

use crate::cache::{CacheError, FetchOutcome, PendingFetch};
use re_grpc_proto::build::bazel::remote::execution::v2::ActionResult;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::oneshot;
use tonic::{Response, Status};

pub type CallResult = Result<ActionResult, Status>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("response channel closed")]
pub struct ChannelClosed;

/// Write side of a unary call. Consumed by the single response it sends.
#[derive(Debug)]
pub struct Responder {
    tx: oneshot::Sender<CallResult>,
}

/// Read side of a unary call, held by the transport.
#[derive(Debug)]
pub struct ResponseHandle {
    rx: oneshot::Receiver<CallResult>,
}

impl Responder {
    pub fn channel() -> (Responder, ResponseHandle) {
        let (tx, rx) = oneshot::channel();
        (Responder { tx }, ResponseHandle { rx })
    }

    /// Fails when the call is already gone, i.e. the client cancelled or
    /// disconnected.
    pub fn send(self, result: CallResult) -> Result<(), ChannelClosed> {
        self.tx.send(result).map_err(|_| ChannelClosed)
    }
}

impl ResponseHandle {
    /// Converts the call's outcome into what tonic sends. A responder dropped
    /// without a response closes the call as `CANCELLED`, which is what the
    /// client of an abandoned call observes.
    pub async fn into_response(self) -> Result<Response<ActionResult>, Status> {
        match self.await {
            Some(result) => result.map(Response::new),
            None => Err(Status::cancelled("call closed without a response")),
        }
    }
}

impl Future for ResponseHandle {
    /// `None` when the responder was dropped without responding.
    type Output = Option<CallResult>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BridgeState {
    /// Lookup in flight, nothing delivered yet.
    Dispatched = 0,
    /// An outcome claimed the bridge and is being written.
    Delivering = 1,
    /// The client went away; no response was or will be sent.
    Cancelled = 2,
    /// A result or not-found was delivered.
    Completed = 3,
    /// An error status was delivered.
    Errored = 4,
}

impl BridgeState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => BridgeState::Dispatched,
            1 => BridgeState::Delivering,
            2 => BridgeState::Cancelled,
            3 => BridgeState::Completed,
            _ => BridgeState::Errored,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, BridgeState::Dispatched | BridgeState::Delivering)
    }
}

/// Turns one lookup outcome into one response.
///
/// [`observe`](Self::observe) may be called from any thread and any number of
/// times; the first call claims the bridge and later ones are discarded.
pub struct CompletionBridge {
    state: AtomicU8,
    // Only touched by the call that won the state transition.
    responder: Mutex<Option<Responder>>,
    instance_name: String,
    digest: String,
}

impl CompletionBridge {
    pub fn new(responder: Responder, instance_name: String, digest: String) -> Arc<Self> {
        Arc::new(Self {
            state: AtomicU8::new(BridgeState::Dispatched as u8),
            responder: Mutex::new(Some(responder)),
            instance_name,
            digest,
        })
    }

    pub fn state(&self) -> BridgeState {
        BridgeState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Observes `pending` on a runtime task and returns immediately.
    pub fn attach(self: &Arc<Self>, pending: PendingFetch) {
        let bridge = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = pending.await;
            bridge.observe(outcome);
        });
    }

    /// Delivers `outcome` unless an earlier outcome already claimed the
    /// bridge. Returns whether this call claimed it. Never blocks.
    pub fn observe(&self, outcome: FetchOutcome) -> bool {
        let claimed = match &outcome {
            Err(e) if e.is_cancelled() => BridgeState::Cancelled,
            _ => BridgeState::Delivering,
        };

        if self
            .state
            .compare_exchange(
                BridgeState::Dispatched as u8,
                claimed as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            tracing::trace!(
                instance = %self.instance_name,
                digest = %self.digest,
                "Discarding duplicate GetActionResult outcome"
            );
            return false;
        }

        let responder = match self.responder.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        let terminal = match outcome {
            Ok(Some(result)) => match responder.map(|r| r.send(Ok(result))) {
                Some(Ok(())) => BridgeState::Completed,
                // The call is gone; handle it like a failure that arrived late.
                _ => self.on_failure(None, CacheError::Cancelled),
            },
            Ok(None) => {
                tracing::debug!(
                    instance = %self.instance_name,
                    digest = %self.digest,
                    "Action result not found"
                );
                if let Some(responder) = responder {
                    let _ = responder.send(Err(Status::not_found("Action result not found")));
                }
                BridgeState::Completed
            }
            Err(error) => self.on_failure(responder, error),
        };

        self.state.store(terminal as u8, Ordering::Release);
        true
    }

    fn on_failure(&self, responder: Option<Responder>, error: CacheError) -> BridgeState {
        if error.is_cancelled() {
            // Dropping the responder is the only signal left to give.
            tracing::debug!(
                instance = %self.instance_name,
                digest = %self.digest,
                "GetActionResult cancelled by client"
            );
            return BridgeState::Cancelled;
        }

        tracing::warn!(
            instance = %self.instance_name,
            digest = %self.digest,
            "GetActionResult failed: {:#}",
            error
        );

        if let Some(responder) = responder {
            // A client that left in the meantime has nobody to tell.
            let _ = responder.send(Err(Status::from(error)));
        }
        BridgeState::Errored
    }
}
