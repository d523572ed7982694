//! Job Disposal Daemon - Main Entry Point
//! Owns the marker store and serves the administration API

mod config;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, LogFormat};
use disposal_api_rpc::{RpcServer, RpcServerConfig};
use disposal_core::application::DisposalClient;
use disposal_infra_sqlite::{create_pool, run_migrations, SqliteMarkerStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_LOG_FILTER: &str =
    "disposal_core=info,disposal_infra_sqlite=info,disposal_api_rpc=info,job_disposal=info";

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .try_init(),
    }
    .context("Failed to install tracing subscriber")
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env().context("Invalid configuration")?;

    // 2. Initialize logging
    init_logging(config.log_format)?;
    info!("Job Disposal v{} starting...", VERSION);

    // 3. Initialize database
    if let Some(parent) = Path::new(&config.db_path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    info!(db_path = %config.db_path, "Initializing database...");

    let pool = create_pool(&config.db_path)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Setup dependencies (DI wiring)
    let store = Arc::new(SqliteMarkerStore::new(pool.clone()));
    let client = DisposalClient::new(store);

    // 5. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let (addr, rpc_handle) = RpcServer::new(rpc_config, client)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;
    pool.close().await;

    info!("Shutdown complete.");
    Ok(())
}
