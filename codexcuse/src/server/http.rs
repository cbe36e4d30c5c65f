//! HTTP server implementation for Codexcuse.

use std::sync::Arc;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;

use super::auth::{Credentials, require_basic_auth};
use super::config::ServerConfig;
use super::handlers::{
    AppState, handle_add, handle_delete, handle_get, handle_list, handle_metrics, handle_ping,
};
use super::metrics::Metrics;
use super::middleware::{trace_requests, track_metrics};
use crate::ExcuseStore;

/// Builds the application router.
///
/// `/api` routes require basic auth with `credentials`; `/health/ping` and
/// `/metrics` are open.
pub fn build_router(state: AppState, credentials: Credentials) -> Router {
    if !credentials.is_complete() {
        tracing::warn!("basic auth credentials are not configured; /api routes will reject every request");
    }
    let metrics = state.metrics.clone();

    let api = Router::new()
        .route("/codexcuses/{source}", get(handle_list).post(handle_add))
        .route(
            "/codexcuses/{source}/{id}",
            get(handle_get).delete(handle_delete),
        )
        .route_layer(from_fn_with_state(Arc::new(credentials), require_basic_auth));

    Router::new()
        .nest("/api", api)
        .route("/health/ping", get(handle_ping))
        .route("/metrics", get(handle_metrics))
        .layer(from_fn(trace_requests))
        .layer(from_fn_with_state(metrics, track_metrics))
        .with_state(state)
}

/// HTTP server for the excuse service.
pub struct CodexcuseServer {
    store: Arc<ExcuseStore>,
    config: ServerConfig,
}

impl CodexcuseServer {
    /// Create a new server.
    pub fn new(store: Arc<ExcuseStore>, config: ServerConfig) -> Self {
        Self { store, config }
    }

    /// Run the HTTP server until SIGINT or SIGTERM.
    pub async fn run(self) -> std::io::Result<()> {
        let state = AppState {
            store: self.store,
            metrics: Arc::new(Metrics::new()),
            environment: self.config.environment.clone(),
        };
        let app = build_router(state, self.config.credentials);

        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Starting Codexcuse HTTP server on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shut down gracefully");
        Ok(())
    }
}

/// Listen for SIGTERM (container termination) and SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
