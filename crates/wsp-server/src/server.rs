use std::sync::Arc;

use tokio::net::TcpListener;
use wsp_resolver::SiteResolver;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Preview server for one site.
pub struct PreviewServer {
    config: ServerConfig,
    resolver: Arc<SiteResolver>,
}

impl PreviewServer {
    pub fn new(config: ServerConfig, resolver: SiteResolver) -> Self {
        Self {
            config,
            resolver: Arc::new(resolver),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &SiteResolver {
        &self.resolver
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.resolver.clone())
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> ServerResult<TcpListener> {
        let addr = self.config.bind_addr();
        TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Serve on `listener` until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> ServerResult<()> {
        let app = self.router();
        tracing::info!(addr = %listener.local_addr()?, site = %self.resolver.root(), "preview server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("preview server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
