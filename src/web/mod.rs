//! Web layer module
//!
//! This module provides the HTTP interface for the storefront. Handlers are
//! thin: they parse the request, call a resource manager and wrap the result
//! in the standard [`ApiResponse`] envelope.
//!
//! # Routes
//!
//! - `/api/products` and `/api/products/{id}`: product CRUD (multipart bodies)
//! - `/api/carts`, `/api/carts/{id}` and `/api/carts/{cid}/products/{pid}`:
//!   cart CRUD and line items (JSON bodies)
//! - `/api/public/*`: static files, thumbnails included
//! - `/health`: liveness probe

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    services::{CartManager, ProductManager},
    storage::FileStore,
};

pub mod api;
pub mod handlers;
pub mod responses;

pub use responses::{ApiResponse, handle_error, handle_result};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(
        config: Config,
        store: Arc<dyn FileStore>,
        products: ProductManager,
        carts: CartManager,
    ) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        let app = Self::create_router(AppState {
            config,
            store,
            products,
            carts,
        });

        Ok(Self { app, addr })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        let public_dir = ServeDir::new(&state.config.storage.public_path);
        let body_limit = state.config.web.max_upload_size;

        Router::new()
            .route("/health", get(handlers::health::health_check))
            .merge(Self::api_routes())
            .nest_service("/api/public", public_dir)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    fn api_routes() -> Router<AppState> {
        use api::{carts, products};

        Router::new()
            .route(
                "/api/products",
                get(products::list_products).post(products::create_product),
            )
            .route(
                "/api/products/{id}",
                get(products::get_product)
                    .put(products::update_product)
                    .delete(products::delete_product),
            )
            .route("/api/carts", get(carts::list_carts).post(carts::create_cart))
            .route(
                "/api/carts/{id}",
                get(carts::get_cart).delete(carts::delete_cart),
            )
            .route(
                "/api/carts/{cid}/products/{pid}",
                post(carts::add_product_to_cart).delete(carts::remove_product_from_cart),
            )
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Asset store the upload handlers write into
    pub store: Arc<dyn FileStore>,
    pub products: ProductManager,
    pub carts: CartManager,
}
