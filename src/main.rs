//! No-store API reverse proxy.
//!
//! ```text
//!     Client Request
//!     ─────────────▶ server ──▶ route table ──▶ ProxyHandler
//!                                                 │ OPTIONS → 204
//!                                                 │ rewrite URL (strip prefix)
//!                                                 │ prepare headers/body
//!                                                 ▼
//!     Client Response                        upstream origin
//!     ◀───────────── no-cache headers ◀──────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_proxy::config::{load_config, ProxyConfig};
use api_proxy::lifecycle::Shutdown;
use api_proxy::observability::init_logging;
use api_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "api-proxy")]
#[command(about = "Reverse proxy that forwards API routes upstream with caching disabled", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (built-in defaults when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "api-proxy starting"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
