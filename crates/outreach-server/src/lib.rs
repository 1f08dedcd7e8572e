//! Outreach Server — HTTP API for the insurance outreach backend.
//!
//! A thin axum adapter over `outreach-core`:
//! - prospect intake with background outreach
//! - history inspection and response recording
//! - call scheduling and knowledge lookup endpoints
//!
//! The state is built by the caller (usually the CLI) so the same
//! `AppState` can be shared with other consumers.

pub mod api;

use std::net::SocketAddr;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use outreach_core::AppState;

const DEFAULT_LOG_FILTER: &str = "outreach_server=info,outreach_core=info,tower_http=info";

/// Configuration for the HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Install the global `tracing` subscriber, logging to stderr. `RUST_LOG`
/// overrides the default filter. Later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the full application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::api_router())
        .route("/healthz", axum::routing::get(health_check))
        .route("/api/health", axum::routing::get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server with a pre-built `AppState`.
///
/// Returns the actual address the server is listening on; the server itself
/// runs on a background task.
pub async fn start_server(config: ServerConfig, state: AppState) -> Result<SocketAddr, String> {
    let app = app_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get local address: {}", e))?;

    tracing::info!("Outreach server listening on {}", local_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(local_addr)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "app": "outreach-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
