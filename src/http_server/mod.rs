//! # HTTP Server Module
//!
//! Serves the sales API over HTTP with axum.
//!
//! # Endpoints
//!
//! - `/` - API banner
//! - `/health` - Health check
//! - `/api/sales/*` - Transactions, summary and filter options
//! - `/observability/*` - Health and counters

pub mod config;
pub mod observability_routes;
pub mod sales_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
