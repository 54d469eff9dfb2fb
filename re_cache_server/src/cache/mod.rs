pub mod context;
pub mod error;
pub mod instance;
pub mod key;
pub mod pending;

pub use context::RequestContext;
pub use error::CacheError;
pub use instance::{CacheInstance, DynInstance, Instance};
pub use key::{ActionKey, InvalidDigest};
pub use pending::{FetchCompleter, FetchOutcome, PendingFetch};
