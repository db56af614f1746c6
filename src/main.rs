use std::sync::Arc;

use shardkv::child;
use shardkv::config::{ChildConfig, MasterConfig};
use shardkv::master::{self, service::MasterService};
use shardkv::replication::HttpChildClient;
use shardkv::routing::RoutingTable;
use shardkv::store::PartitionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <master|child> [options]", args[0]);
        eprintln!(
            "Example: {} master --bind 127.0.0.1:6000 --replicas 1 --timeout-ms 500",
            args[0]
        );
        eprintln!(
            "Example: {} child --bind 127.0.0.1:7001 --master 127.0.0.1:6000 --capacity 25229",
            args[0]
        );

        std::process::exit(1);
    }

    match args[1].as_str() {
        "master" => run_master(MasterConfig::from_args(&args[2..])?).await,
        "child" => run_child(ChildConfig::from_args(&args[2..])?).await,
        other => {
            eprintln!("Unknown role {:?}, expected \"master\" or \"child\"", other);
            std::process::exit(1);
        }
    }
}

async fn run_master(config: MasterConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting master on {} (replicas={}, rpc timeout={:?})",
        config.bind,
        config.replica_count,
        config.rpc_timeout
    );

    // 1. Routing + replication:
    let routing = Arc::new(RoutingTable::new(config.replica_count));
    let transport = HttpChildClient::new(config.rpc_timeout);
    let service = Arc::new(MasterService::new(routing, transport));

    // 2. Spawn the health checker:
    let health_service = service.clone();
    tokio::spawn(async move {
        health_service.run_health_loop().await;
    });

    // 3. HTTP server:
    let app = master::router(service);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Master listening on {}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_child(config: ChildConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting child on {} (target capacity {})",
        config.bind,
        config.capacity
    );

    // 1. Local storage:
    let store = Arc::new(PartitionStore::new(config.capacity));
    tracing::info!("Partition store sized to {} buckets", store.capacity());

    // 2. HTTP server, bound before registration so the master can probe us
    //    as soon as it learns about this node:
    let app = child::router(store);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Child listening on {}", config.bind);

    // 3. Announce ourselves:
    if let Some(master_addr) = config.master {
        let id = child::register_with_master(master_addr, config.bind).await?;
        tracing::info!("Serving as child {}", id);
    } else {
        tracing::info!("No --master given, waiting to be registered manually");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
