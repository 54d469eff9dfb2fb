use anyhow::{Context, Result};
use re_cache_server::config::{ActionCacheConfig, InstanceConfig};
use re_cache_server::grpc::ActionCacheService;
use re_cache_server::instances::Instances;
use re_cache_server::stats::RequestStats;
use re_grpc_proto::build::bazel::remote::execution::v2::action_cache_server::ActionCacheServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

pub struct ServerHarness {
    server_handle: JoinHandle<Result<()>>,
    server_addr: SocketAddr,
    shutdown: CancellationToken,
    stats: Arc<RequestStats>,
    _temp_dir: TempDir,
}

impl ServerHarness {
    /// Serves three instances: `main` on the filesystem, the default instance
    /// in memory, and a read-only `frozen` instance.
    pub async fn start() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;

        let instances = vec![
            InstanceConfig {
                name: "main".to_string(),
                allow_updates: true,
                action_cache: ActionCacheConfig::FileSystem {
                    root_dir: temp_dir.path().join("ac-main"),
                },
            },
            InstanceConfig {
                name: String::new(),
                allow_updates: true,
                action_cache: ActionCacheConfig::Memory {
                    max_entries: 1000,
                    ttl_seconds: None,
                },
            },
            InstanceConfig {
                name: "frozen".to_string(),
                allow_updates: false,
                action_cache: ActionCacheConfig::FileSystem {
                    root_dir: temp_dir.path().join("ac-frozen"),
                },
            },
        ];

        let instances = Arc::new(Instances::from_config(&instances).await?);
        let stats = RequestStats::new();
        let shutdown = CancellationToken::new();

        let action_cache_service = ActionCacheService::new(instances, stats.on_request())
            .with_shutdown(shutdown.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let server_addr = listener.local_addr()?;

        tracing::info!("Test server starting on {}", server_addr);

        let server_shutdown = shutdown.clone();
        let server_handle = tokio::spawn(async move {
            Server::builder()
                .add_service(ActionCacheServer::new(action_cache_service))
                .serve_with_incoming_shutdown(
                    tokio_stream::wrappers::TcpListenerStream::new(listener),
                    server_shutdown.cancelled_owned(),
                )
                .await
                .context("Server failed")
        });

        Ok(Self {
            server_handle,
            server_addr,
            shutdown,
            stats,
            _temp_dir: temp_dir,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.server_addr)
    }

    /// GetActionResult calls that reached a backend so far.
    pub fn requests(&self) -> u64 {
        self.stats.requests()
    }

    pub async fn shutdown(self) -> Result<()> {
        self.shutdown.cancel();
        Ok(())
    }
}

impl Drop for ServerHarness {
    fn drop(&mut self) {
        self.shutdown.cancel();
        self.server_handle.abort();
    }
}
