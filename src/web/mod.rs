// Web server: Axum-based HTTP surface for the filter service.
//
// Routes:
//   GET  /        static status payload with the backend's model identifier
//   POST /filter  classify a piece of text
//   GET  /health  bare liveness probe
//
// No auth and no per-request shared mutable state: the only shared value is
// the read-only FilterService built at startup.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::filter::service::FilterService;

pub mod error;
pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FilterService>,
}

impl AppState {
    pub fn new(service: FilterService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Start the Axum web server and block until it exits (Ctrl-C).
pub async fn run_server(service: FilterService, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState::new(service));

    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Brain rot filter listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::status::get_status))
        .route("/filter", post(handlers::filter::filter_content))
        .route("/health", get(health))
        .layer(
            // The feed frontend calls us from another origin.
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe. Always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
