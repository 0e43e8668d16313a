//! Admin Area IP Guard
//!
//! A thin reverse proxy that refuses requests to the admin prefix unless
//! the client address falls in an allowed subnet.
//!
//! ```text
//!     Client ──▶ listener ──▶ admin guard ──▶ forward ──▶ upstream app
//!                                  │
//!                                  └── 400 Bad Request on deny
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin_guard::config::{load_config, GuardConfig};
use admin_guard::http::HttpServer;
use admin_guard::lifecycle::{wait_for_signal, Shutdown};

#[derive(Parser)]
#[command(name = "admin-guard")]
#[command(about = "Restrict an admin URL prefix to allowed IPv4 subnets", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GuardConfig::default(),
    };

    let level = &config.observability.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("admin_guard={level},tower_http={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "admin-guard starting"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await?;
    shutdown.trigger();

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
