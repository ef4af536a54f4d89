// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session anti-forgery tokens.
//!
//! A token is created when the submission page is rendered and compared
//! (not consumed) on submit, so a session can resubmit after a validation
//! failure without reloading the page. Sessions idle past their TTL are
//! dropped when new sessions are issued, bounding the store by recently
//! active clients rather than every cookie ever handed out.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use postbox_core::PostboxError;
use ring::constant_time::verify_slices_are_equal;
use ring::rand::{SecureRandom, SystemRandom};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "postbox_session";

/// Idle lifetime of a session token. A page render refreshes it.
const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24);

struct SessionEntry {
    token: String,
    issued: Instant,
}

impl SessionEntry {
    fn expired(&self, ttl: Duration) -> bool {
        self.issued.elapsed() >= ttl
    }
}

/// In-memory map of session id to CSRF token.
pub struct SessionStore {
    tokens: DashMap<String, SessionEntry>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
        }
    }

    /// Create a new session with a fresh token. Returns `(session_id, token)`.
    pub fn issue(&self) -> Result<(String, String), PostboxError> {
        self.sweep_expired();
        let session_id = uuid::Uuid::new_v4().to_string();
        let token = new_token()?;
        self.tokens.insert(
            session_id.clone(),
            SessionEntry {
                token: token.clone(),
                issued: Instant::now(),
            },
        );
        Ok((session_id, token))
    }

    /// Return the session's token, minting one if the session has none
    /// (e.g. the cookie outlived a server restart or the token expired).
    pub fn token_or_issue(&self, session_id: &str) -> Result<String, PostboxError> {
        if let Some(mut entry) = self.tokens.get_mut(session_id) {
            if !entry.expired(self.ttl) {
                // Rendering the page keeps an active session alive.
                entry.issued = Instant::now();
                return Ok(entry.token.clone());
            }
        }
        let token = new_token()?;
        self.tokens.insert(
            session_id.to_string(),
            SessionEntry {
                token: token.clone(),
                issued: Instant::now(),
            },
        );
        Ok(token)
    }

    /// Compare a presented token against the session's stored token.
    ///
    /// Constant-time comparison; an unknown or expired session or an empty
    /// presentation never verifies.
    pub fn verify(&self, session_id: &str, presented: &str) -> bool {
        match self.tokens.get(session_id) {
            Some(entry) if !entry.expired(self.ttl) => {
                verify_slices_are_equal(entry.token.as_bytes(), presented.as_bytes()).is_ok()
            }
            _ => false,
        }
    }

    fn sweep_expired(&self) {
        self.tokens.retain(|_, entry| !entry.expired(self.ttl));
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Generate a 256-bit random token as hex.
fn new_token() -> Result<String, PostboxError> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes)
        .map_err(|_| PostboxError::Crypto("failed to generate csrf token".to_string()))?;
    Ok(hex::encode(bytes))
}
