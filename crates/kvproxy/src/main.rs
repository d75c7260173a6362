use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use kvproxy::config::Config;
use kvproxy::kv::KvService;
use kvproxy::lease::LeaseService;
use kvproxy::shard::ShardSet;
use kvproxy::watch::WatchService;
use kvproxy::{logging, Generator};
use proto_grpc::etcdserverpb::kv_server::KvServer;
use proto_grpc::etcdserverpb::lease_server::LeaseServer;
use proto_grpc::etcdserverpb::watch_server::WatchServer;

/// A transparent sharding proxy for etcd v3: one KV/Watch/Lease endpoint,
/// fanned out to a static set of backend shards that each own a contiguous
/// key range.
#[derive(Debug, Parser)]
#[command(about, version)]
struct Cli {
    /// Proxy listen address.
    #[arg(long, default_value = "0.0.0.0", env = "KVPROXY_ADDR")]
    addr: String,
    /// Proxy listen port.
    #[arg(long, default_value = "2379", env = "KVPROXY_PORT")]
    port: u16,
    /// Proxy config file path.
    #[arg(long, default_value = "./config.yaml", env = "KVPROXY_CONFIG")]
    config: PathBuf,

    #[command(flatten)]
    log: logging::LogArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::install(&cli.log);

    let config = Config::from_file(&cli.config)?;
    let shards = Arc::new(
        ShardSet::from_config(&config).context("failed to create shard clients")?,
    );
    for shard in shards.shards() {
        tracing::debug!(
            id = shard.client().id(),
            start = ?shard.start(),
            end = ?shard.end(),
            "configured shard"
        );
    }
    tracing::info!(shards = shards.len(), "loaded sharding config");

    let id_gen = Arc::new(Generator::new(0, std::time::SystemTime::now()));

    let addr: std::net::SocketAddr = format!("{}:{}", cli.addr, cli.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cli.addr, cli.port))?;
    tracing::info!(%addr, "grpc server serving");

    tonic::transport::Server::builder()
        .add_service(KvServer::new(KvService::new(shards.clone())))
        .add_service(WatchServer::new(WatchService::new(shards.clone())))
        .add_service(LeaseServer::new(LeaseService::new(shards, id_gen)))
        .serve_with_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("received ctrl-c, shutting down");
        })
        .await
        .context("grpc server failed")?;

    Ok(())
}
