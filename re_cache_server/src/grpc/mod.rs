pub mod action_cache_service;
pub mod completion;

pub use action_cache_service::ActionCacheService;
pub use completion::{BridgeState, CompletionBridge, ResponseHandle, Responder};
