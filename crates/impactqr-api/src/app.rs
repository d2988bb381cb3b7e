//! Application builder. Wires router, middleware and state into an Axum
//! app, and runs it alongside the reaper.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use impactqr_core::config::AppConfig;
use impactqr_core::error::AppError;
use impactqr_worker::Reaper;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
}

/// Runs the ImpactQR server until Ctrl+C or SIGTERM.
///
/// Owns the registry for the lifetime of the process. The reaper starts
/// once the listener is bound and stops after the server drains.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ImpactQR server...");

    let state = AppState::new(config)?;
    let config = Arc::clone(&state.config);

    tracing::info!(
        ttl_minutes = config.links.ttl_minutes,
        max_file_mb = config.uploads.max_file_mb,
        max_total_mb = config.uploads.max_total_mb,
        max_files = config.uploads.max_files,
        "Link store ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    let reaper = Reaper::new(Arc::clone(&state.registry), config.links.sweep_interval()).start();
    let app = build_app(state);

    tracing::info!("ImpactQR server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    reaper.stop().await;

    served.map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("ImpactQR server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
