use prost::Message;
use re_grpc_proto::build::bazel::remote::execution::v2::RequestMetadata;
use re_grpc_proto::REQUEST_METADATA_HEADER;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tonic::metadata::MetadataMap;

/// Call-scoped metadata threaded from an RPC to the backend lookup it causes.
///
/// Cloned per call and never mutated. The cancellation token fires when the
/// originating RPC is abandoned by its client.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    metadata: Option<RequestMetadata>,
    cancellation: CancellationToken,
}

impl RequestContext {
    pub fn new(cancellation: CancellationToken) -> Self {
        Self {
            metadata: None,
            cancellation,
        }
    }

    /// Reads the client's `RequestMetadata` from the binary header, if any.
    /// Undecodable metadata only costs us correlation, so it is dropped.
    pub fn from_metadata(headers: &MetadataMap, cancellation: CancellationToken) -> Self {
        let metadata = headers.get_bin(REQUEST_METADATA_HEADER).and_then(|value| {
            let decoded = value
                .to_bytes()
                .map_err(|e| e.to_string())
                .and_then(|bytes| RequestMetadata::decode(bytes).map_err(|e| e.to_string()));

            match decoded {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    tracing::debug!("Ignoring undecodable {}: {}", REQUEST_METADATA_HEADER, e);
                    None
                }
            }
        });

        Self {
            metadata,
            cancellation,
        }
    }

    pub fn metadata(&self) -> Option<&RequestMetadata> {
        self.metadata.as_ref()
    }

    pub fn tool_invocation_id(&self) -> &str {
        self.metadata
            .as_ref()
            .map_or("", |m| m.tool_invocation_id.as_str())
    }

    pub fn action_id(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.action_id.as_str())
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancellation.cancelled()
    }
}
