use anyhow::{Context, Result};
use clap::Parser;
use re_cache_server::{
    config::ServerConfig, grpc::ActionCacheService, instances::Instances, stats::RequestStats,
};
use re_grpc_proto::build::bazel::remote::execution::v2::action_cache_server::ActionCacheServer;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "re-cache-server")]
#[command(version)]
#[command(about = "Remote Execution API action cache server", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = ServerConfig::from_file(&cli.config)?;

    tracing::info!("Initializing {} instance(s)...", config.instances.len());
    let instances = Arc::new(Instances::from_config(&config.instances).await?);

    let shutdown = CancellationToken::new();
    let stats = RequestStats::new();
    let stats_reporter = tokio::spawn(report_stats(
        stats.clone(),
        config.server.stats_interval(),
        shutdown.clone(),
    ));

    let action_cache_service = ActionCacheService::new(instances, stats.on_request())
        .with_shutdown(shutdown.clone());

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .with_context(|| format!("Invalid server address {:?}", config.server.address))?;
    tracing::info!("Starting server on {}", addr);

    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    Server::builder()
        .add_service(ActionCacheServer::new(action_cache_service))
        .serve_with_shutdown(addr, shutdown.clone().cancelled_owned())
        .await?;

    shutdown.cancel();
    stats_reporter.await.ok();
    tracing::info!(
        "Server stopped after {} GetActionResult request(s)",
        stats.requests()
    );

    Ok(())
}

async fn cancel_on_ctrl_c(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
    }
    shutdown.cancel();
}

async fn report_stats(stats: Arc<RequestStats>, interval: Duration, shutdown: CancellationToken) {
    if interval.is_zero() {
        return;
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tracing::debug!("GetActionResult requests so far: {}", stats.requests());
            }
            _ = shutdown.cancelled() => break,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "re_cache_server=debug,re_cache_server_bin=debug"
    } else {
        "re_cache_server=info,re_cache_server_bin=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
