//! HTTP API for the speedrun orchestrator.
//!
//! Exposes the docs, plan, clip, greet and workflow operations as JSON
//! endpoints under `/api` via axum, and optionally serves a static UI
//! directory for every other path.

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use speedrun_shared::{Result, ServerConfig, SpeedrunError};

pub use error::ApiError;
pub use routes::{AppState, api_router};

/// Build the full application: API routes, static files, CORS, and request tracing.
pub fn build_app(static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = api_router();

    if let Some(dir) = static_dir {
        if Path::new(dir).is_dir() {
            info!(static_dir = dir, "serving static UI");
            app = app.fallback_service(ServeDir::new(dir));
        } else {
            warn!(static_dir = dir, "static directory not found, UI won't be served");
        }
    }

    app.layer(cors).layer(TraceLayer::new_for_http())
}

async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| SpeedrunError::Server(format!("failed to bind to {addr}: {e}")))
}

/// Start the server in a background task and return the bound address.
pub async fn start_server(config: &ServerConfig) -> Result<SocketAddr> {
    let listener = bind(config).await?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| SpeedrunError::Server(format!("failed to get local address: {e}")))?;
    let app = build_app(config.static_dir.as_deref());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    info!(%local_addr, "speedrun API listening");
    Ok(local_addr)
}

/// Run the server in the foreground until ctrl-c.
pub async fn run_server(config: &ServerConfig) -> Result<()> {
    let listener = bind(config).await?;
    let app = build_app(config.static_dir.as_deref());

    info!(
        "Speedrun Orchestrator UI available at http://{}:{}",
        config.host, config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SpeedrunError::Server(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    info!("shutting down");
}
