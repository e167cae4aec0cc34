//! # NodeLink Node
//!
//! The main entry point for the NodeLink hub. Wires the file-backed
//! store and default collaborators into the hub and serves the
//! HTTP/WebSocket surface until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use nodelink_hub::{
    FileBackedKVStore, Hub, HubConfig, HubService, LoggingBurnProcedure, LoggingIntelSink,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// NodeLink secure communications hub
#[derive(Debug, Parser)]
#[command(name = "nodelink-node", version, about)]
struct Args {
    /// Bind host
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port
    #[arg(long, default_value_t = 8443)]
    port: u16,

    /// Directory for durable state
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Log filter (tracing EnvFilter syntax)
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&args.log_filter).context("parsing log filter")?,
        )
        .init();

    let config = HubConfig {
        host: args.host,
        port: args.port,
        data_dir: args.data_dir,
        ..HubConfig::default()
    };
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e))
        .context("validating configuration")?;

    info!(addr = %config.bind_addr(), data_dir = %config.data_dir.display(), "starting NodeLink hub");

    let store = FileBackedKVStore::new(config.store_path());
    let hub = Hub::new(
        config,
        store,
        Arc::new(LoggingIntelSink),
        Arc::new(LoggingBurnProcedure),
    )
    .context("initializing hub")?;

    let mut service = HubService::new(Arc::new(hub));

    tokio::select! {
        result = service.start() => {
            result.context("running hub service")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
        }
    }

    Ok(())
}
