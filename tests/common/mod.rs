//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::{http::Uri, Router};
use tokio::net::TcpListener;

use admin_guard::config::GuardConfig;
use admin_guard::http::HttpServer;
use admin_guard::lifecycle::Shutdown;

/// Start an upstream that answers every request with `upstream:<path>`.
pub async fn start_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(|uri: Uri| async move { format!("upstream:{}", uri.path()) });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start the guard in front of `upstream` and return its address.
///
/// Keep the returned `Shutdown` alive for the duration of the test.
pub async fn start_guard(mut config: GuardConfig, upstream: SocketAddr) -> (SocketAddr, Shutdown) {
    config.upstream.address = upstream.to_string();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    (addr, shutdown)
}

/// A config restricting `/admin` to `subnets`.
pub fn admin_config(subnets: &[&str]) -> GuardConfig {
    let mut config = GuardConfig::default();
    config.admin.prefix = "admin".into();
    config.admin.allowed_subnets = subnets.iter().map(|s| s.parse().unwrap()).collect();
    config
}
