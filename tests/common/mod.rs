pub mod server_harness;
pub mod client_factory;

pub use server_harness::ServerHarness;
pub use client_factory::TestClientFactory;
