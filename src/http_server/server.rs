//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::ApiHandler;
use crate::observability::{log_event, Event};

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::sales_routes::sales_routes;

/// HTTP server for the sales API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `handler`
    pub fn new(config: HttpServerConfig, handler: Arc<ApiHandler>) -> Self {
        let router = Self::build_router(&config, handler);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, handler: Arc<ApiHandler>) -> Router {
        let cors = config.cors_layer();

        Router::new()
            // Banner and health check at root level
            .merge(health_routes())
            // Sales queries under /api/sales
            .nest("/api/sales", sales_routes(handler.clone()))
            // Observability routes under /observability
            .nest("/observability", observability_routes(handler))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event(Event::Serving);
        info!(address = %addr, "sales API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        log_event(Event::ShutdownStart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiLimits;
    use crate::dataset::Dataset;

    fn handler() -> Arc<ApiHandler> {
        Arc::new(ApiHandler::new(Dataset::shared(Vec::new()), ApiLimits::default()))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::default(), handler());
        assert_eq!(server.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(HttpServerConfig::with_port(8080), handler());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_permissive_cors() {
        let config = HttpServerConfig {
            cors_origins: Vec::new(),
            ..Default::default()
        };
        let _router = HttpServer::new(config, handler()).router();
    }
}
