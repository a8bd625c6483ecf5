// SPDX-FileCopyrightText: 2026 Mindcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use mindcheck_core::MindcheckError;
use mindcheck_triage::Dispatcher;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Largest request body accepted by the JSON endpoints.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Routes each request to the deterministic or remote path.
    pub dispatcher: Arc<Dispatcher>,
    /// Upper bound on a single request's handling time.
    pub request_timeout: Duration,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, request_timeout: Duration) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            request_timeout,
            start_time: Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors `ServerConfig` from mindcheck-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory of static front-end assets, served for unmatched paths.
    pub static_dir: Option<PathBuf>,
}

/// Builds the application router.
///
/// Routes:
/// - POST /api/assess
/// - POST /api/chat
/// - GET /health
/// - everything else from `static_dir` when configured
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api_routes = Router::new()
        .route("/api/assess", post(handlers::post_assess))
        .route("/api/chat", post(handlers::post_chat))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let mut app = Router::new()
        .route("/health", get(handlers::get_health))
        .merge(api_routes)
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), MindcheckError> {
    let remote_enabled = state.dispatcher.remote_enabled();
    let app = router(state, config.static_dir.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MindcheckError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(remote_enabled, "Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| MindcheckError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(Dispatcher::deterministic(), Duration::from_secs(5))
    }

    #[test]
    fn app_state_is_clone() {
        let state = state();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.dispatcher, &cloned.dispatcher));
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found_without_static_dir() {
        let res = router(state(), None)
            .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn static_dir_serves_front_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>mindcheck</h1>").unwrap();

        let res = router(state(), Some(dir.path().to_path_buf()))
            .oneshot(Request::get("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>mindcheck</h1>");
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let padding = "x".repeat(MAX_BODY_BYTES + 1);
        let body = format!(r#"{{"messages":[{{"role":"user","content":"{padding}"}}]}}"#);
        let res = router(state(), None)
            .oneshot(
                Request::post("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let res = router(state(), None)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/chat")
                    .header("origin", "http://localhost:5173")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(res.headers().contains_key("access-control-allow-origin"));
    }
}
