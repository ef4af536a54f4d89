// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server for the Postbox contact form.
//!
//! Serves the submission page, runs the submission pipeline (CSRF check,
//! input validation, message encryption, persistence), and enforces
//! per-client rate limiting before the handler runs. Responses follow a
//! fixed JSON contract: `{"success": bool, "message": "..."}`.

pub mod csrf;
pub mod handlers;
pub mod ratelimit;
pub mod server;
pub mod validate;

use std::sync::Arc;
use std::time::Instant;

use postbox_config::PostboxConfig;
use postbox_crypto::MessageCipher;
use postbox_storage::Database;

use crate::csrf::SessionStore;
use crate::ratelimit::RateLimiter;

/// Shared state for axum request handlers.
///
/// Everything here is either read-only after construction (cipher) or
/// internally synchronized (database single-writer thread, DashMap-backed
/// session and rate-limit stores), so the state is shared as a plain `Arc`.
pub struct AppState {
    /// Single-writer SQLite handle.
    pub db: Database,
    /// Process-lifetime message cipher.
    pub cipher: MessageCipher,
    /// Per-session CSRF tokens.
    pub sessions: SessionStore,
    /// Per-client submission rate limiter.
    pub limiter: RateLimiter,
    /// Process start time for the health endpoint.
    pub started: Instant,
}

impl AppState {
    /// Assemble the shared state from its collaborators.
    pub fn new(config: &PostboxConfig, db: Database, cipher: MessageCipher) -> Arc<Self> {
        Arc::new(Self {
            db,
            cipher,
            sessions: SessionStore::new(),
            limiter: RateLimiter::new(&config.rate_limit),
            started: Instant::now(),
        })
    }
}
