use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Invoked once for every lookup the service dispatches, whatever its outcome.
pub type OnRequest = Arc<dyn Fn() + Send + Sync>;

pub fn noop_on_request() -> OnRequest {
    Arc::new(|| {})
}

/// Counts dispatched lookups for load reporting.
#[derive(Debug, Default)]
pub struct RequestStats {
    requests: AtomicU64,
}

impl RequestStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn on_request(self: &Arc<Self>) -> OnRequest {
        let stats = Arc::clone(self);
        Arc::new(move || stats.record())
    }
}
