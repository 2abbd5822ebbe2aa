//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;

use crate::core::{Config, Result, ServerState};
use crate::services::HttpService;

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        let state = ServerState::initialize(&self.config).await?;
        state.print_banner();
        if self.config.is_development() {
            tracing::warn!("Development environment: unset admin credentials use built-in fallbacks");
        }

        let http = HttpService::new(state);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🦀 Counter server starting on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        http.start_server(addr, shutdown).await?;
        Ok(())
    }
}
