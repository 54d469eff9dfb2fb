use anyhow::{Context, Result};
use prost::Message;
use re_grpc_proto::build::bazel::remote::execution::v2::{
    action_cache_client::ActionCacheClient, RequestMetadata,
};
use re_grpc_proto::REQUEST_METADATA_HEADER;
use std::time::Duration;
use tonic::metadata::MetadataValue;
use tonic::transport::{Channel, Endpoint};

pub struct TestClientFactory;

impl TestClientFactory {
    pub async fn create_action_cache_client(server_url: &str) -> Result<ActionCacheClient<Channel>> {
        // The listener is bound before the harness returns, but the server
        // task may not be accepting yet.
        let endpoint = Endpoint::from_shared(server_url.to_string())?;
        let mut attempts = 0;

        loop {
            match endpoint.connect().await {
                Ok(channel) => return Ok(ActionCacheClient::new(channel)),
                Err(_) if attempts < 50 => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(20)).await;
                }
                Err(e) => return Err(e).context("Failed to connect action cache client"),
            }
        }
    }

    /// Wraps `message` with the binary `RequestMetadata` header a build tool sends.
    pub fn with_request_metadata<T>(message: T, metadata: &RequestMetadata) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        request.metadata_mut().insert_bin(
            REQUEST_METADATA_HEADER,
            MetadataValue::from_bytes(&metadata.encode_to_vec()),
        );
        request
    }
}
