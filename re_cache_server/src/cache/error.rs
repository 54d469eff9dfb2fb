use thiserror::Error;
use tonic::{Code, Status};

/// Failure of an instance cache operation.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The caller withdrew interest before the operation finished.
    #[error("operation cancelled by caller")]
    Cancelled,

    /// A blocking write was interrupted by service shutdown.
    #[error("operation interrupted")]
    Interrupted,

    /// The producer of a pending fetch went away without an outcome.
    #[error("fetch completed without an outcome")]
    Abandoned,

    #[error("updates are disabled for instance {0:?}")]
    UpdatesDisabled(String),

    /// A backend that already speaks gRPC status codes, e.g. a remote cache.
    #[error("{0}")]
    Status(Status),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl CacheError {
    pub fn code(&self) -> Code {
        match self {
            CacheError::Cancelled => Code::Cancelled,
            CacheError::Interrupted => Code::Aborted,
            CacheError::Abandoned => Code::Internal,
            CacheError::UpdatesDisabled(_) => Code::PermissionDenied,
            CacheError::Status(status) => status.code(),
            CacheError::Backend(_) => Code::Internal,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.code() == Code::Cancelled
    }
}

impl From<Status> for CacheError {
    fn from(status: Status) -> Self {
        CacheError::Status(status)
    }
}

/// Status reported to clients. Backend error chains stay in the server log.
impl From<CacheError> for Status {
    fn from(error: CacheError) -> Self {
        match error {
            CacheError::Status(status) => status,
            CacheError::Backend(_) => Status::internal("action cache backend failure"),
            other => Status::new(other.code(), other.to_string()),
        }
    }
}
