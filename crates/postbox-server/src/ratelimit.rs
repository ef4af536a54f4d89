// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-window per-client rate limiting.
//!
//! Runs as route middleware on the submission endpoint, so a limited client
//! is rejected before the submission handler executes. The client identity
//! is the peer socket address, or the first `X-Forwarded-For` entry when
//! `rate_limit.trust_forwarded_for` is set for reverse proxy deployments.
//! The header is client-controlled, so it is never honored by default.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use postbox_config::model::RateLimitConfig;
use tracing::warn;

use crate::handlers::SubmitResponse;
use crate::AppState;

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counter per client key.
pub struct RateLimiter {
    max_per_window: u32,
    window: Duration,
    trust_forwarded_for: bool,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_per_window: config.max_per_window,
            window: Duration::from_secs(config.window_secs),
            trust_forwarded_for: config.trust_forwarded_for,
            windows: DashMap::new(),
        }
    }

    /// Record one request for `key`. Returns false when the key has
    /// exhausted its budget for the current window.
    ///
    /// Expired windows are dropped on every call, so the map never holds
    /// more entries than clients seen within the current window.
    pub fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();
        self.windows
            .retain(|_, w| now.duration_since(w.started) < self.window);

        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if entry.count < self.max_per_window {
            entry.count += 1;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

/// Middleware rejecting clients over their submission budget with 429.
pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request, state.limiter.trust_forwarded_for);

    if state.limiter.try_acquire(&key) {
        next.run(request).await
    } else {
        warn!(client = %key, "submission rate limit exceeded");
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(SubmitResponse {
                success: false,
                message: "too many requests".to_string(),
            }),
        )
            .into_response()
    }
}

/// Client identity for rate limiting: the peer address, else a shared
/// bucket. The first `X-Forwarded-For` entry takes precedence only when
/// the deployment declared its proxy trustworthy.
fn client_key(request: &Request, trust_forwarded_for: bool) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .filter(|_| trust_forwarded_for)
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
