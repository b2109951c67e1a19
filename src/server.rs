//! HTTP server initialization and runtime setup.
//!
//! Wires the shared state, applies path normalization, and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::Config;
use crate::delivery::{ContactSink, LogSink, NullSink};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Contact sink (log-backed in development, no-op otherwise)
/// - Shared state (rate limiter, security header set)
/// - Axum HTTP server with path normalization
///
/// # Errors
///
/// Returns an error if:
/// - The listen address does not parse
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let contact_sink: Arc<dyn ContactSink> = if config.environment.is_development() {
        tracing::info!("Contact delivery: log only");
        Arc::new(LogSink::new())
    } else {
        tracing::info!("Contact delivery: disabled (NullSink)");
        Arc::new(NullSink::new())
    };

    let state = AppState::new(config.clone(), contact_sink);

    // Normalization wraps the whole router so `/api/contact/` and
    // `/api/contact` hit the same route and the same limiter prefix.
    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Waits for SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
