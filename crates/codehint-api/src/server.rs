//! Interface server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::http::routes::create_router;
use crate::state::AppState;

/// Interface server configuration.
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    pub host: String,
    pub port: u16,
}

impl InterfaceConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

/// The interface server.
pub struct InterfaceServer {
    config: InterfaceConfig,
    state: Arc<AppState>,
}

impl InterfaceServer {
    pub fn new(config: InterfaceConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Start the server.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_until(std::future::pending()).await
    }

    /// Start the server and stop gracefully once `shutdown` resolves.
    pub async fn run_until(
        &self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(self.state.clone());

        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Interface server listening on {}", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
