use super::error::CacheError;
use re_grpc_proto::build::bazel::remote::execution::v2::ActionResult;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Outcome of a lookup: a hit, an explicit miss, or a failure.
pub type FetchOutcome = Result<Option<ActionResult>, CacheError>;

/// An in-flight lookup. Resolves exactly once.
pub struct PendingFetch {
    rx: oneshot::Receiver<FetchOutcome>,
}

/// Producer half of a [`PendingFetch`], held by the backend.
pub struct FetchCompleter {
    tx: Mutex<Option<oneshot::Sender<FetchOutcome>>>,
}

impl PendingFetch {
    pub fn channel() -> (FetchCompleter, PendingFetch) {
        let (tx, rx) = oneshot::channel();
        (
            FetchCompleter {
                tx: Mutex::new(Some(tx)),
            },
            PendingFetch { rx },
        )
    }
}

impl FetchCompleter {
    /// Delivers the outcome. Only the first call has any effect; it returns
    /// `false` for every later call or when nobody awaits the fetch anymore.
    pub fn complete(&self, outcome: FetchOutcome) -> bool {
        let tx = match self.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match tx {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

impl Future for PendingFetch {
    type Output = FetchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(CacheError::Abandoned)))
    }
}
