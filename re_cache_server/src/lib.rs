pub mod cache;
pub mod config;
pub mod grpc;
pub mod instances;
pub mod stats;
pub mod storage;
pub mod util;

pub use config::ServerConfig;
