//! pathvault-server - HTTP folder upload service.

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use pathvault_core::PathVault;
use pathvault_server::AppState;
use pathvault_server::Config;
use pathvault_server::create_router;
use pathvault_server::logging;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "pathvault-server")]
#[command(author, version, about = "Serve a vault directory over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "PATHVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// Storage root (overrides the config file)
    #[arg(short, long, env = "PATHVAULT_ROOT")]
    root: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host address to bind (overrides the config file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(root) = args.root {
        config.vault.root = root;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    logging::init(&config.logging.level);

    let vault = PathVault::create(&config.vault.root, config.vault.to_vault_config())
        .with_context(|| format!("cannot open vault root {}", config.vault.root.display()))?;

    tracing::info!(
        root = %vault.root().as_path().display(),
        max_request_mb = config.vault.max_request_size_mb,
        "Vault ready"
    );

    let state = Arc::new(AppState::new(vault));
    let app = create_router(state, config.vault.max_request_bytes());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
