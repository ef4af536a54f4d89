// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. The rate limiter is
//! attached as a route layer on `/submit` only, so page renders and health
//! probes are never counted against a client's budget.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use postbox_core::PostboxError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::ratelimit;
use crate::AppState;

/// Build the application router.
///
/// Routes:
/// - GET / (submission page, issues session + CSRF token)
/// - POST /submit (rate-limited submission pipeline)
/// - GET /health (unauthenticated status)
pub fn build_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::get_index))
        .route("/health", get(handlers::get_health))
        .with_state(Arc::clone(&state));

    let submit_routes = Router::new()
        .route("/submit", post(handlers::post_submit))
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&state),
            ratelimit::rate_limit_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(submit_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn start_server(
    host: &str,
    port: u16,
    state: Arc<AppState>,
) -> Result<(), PostboxError> {
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PostboxError::Internal(format!("failed to bind to {addr}: {e}")))?;

    info!("Postbox server listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| PostboxError::Internal(format!("server error: {e}")))?;

    Ok(())
}
