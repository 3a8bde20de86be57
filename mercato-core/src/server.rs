use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::MercatoConfig;

/// Bind address of a service, from `server.host` / `server.port`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_config(config: &MercatoConfig, default_port: u16) -> Self {
        Self {
            host: config.get_or("server.host", "0.0.0.0".to_string()),
            port: config.get_or("server.port", default_port),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Serve `router` until Ctrl-C, then drain in-flight requests.
pub async fn serve(router: Router, config: &ServerConfig, service: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    let local: SocketAddr = listener.local_addr()?;
    info!(service, addr = %local, "Listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
