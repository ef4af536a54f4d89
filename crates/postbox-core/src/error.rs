// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Postbox contact intake service.

use thiserror::Error;

/// The primary error type used across all Postbox crates.
///
/// The submission handler converts every variant into the fixed JSON
/// response contract at the HTTP boundary; nothing propagates past it.
#[derive(Debug, Error)]
pub enum PostboxError {
    /// Configuration errors (invalid TOML, missing required fields, bad key material).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input validation failures. The reason string is echoed to the client.
    #[error("{0}")]
    Validation(String),

    /// Anti-forgery token missing or mismatched.
    #[error("invalid csrf token")]
    Csrf,

    /// Encryption failures (key setup, nonce generation, seal/open).
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Storage backend errors (database connection, query failure, constraint violation).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PostboxError {
    /// True when the error was caused by the client (maps to HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(self, PostboxError::Validation(_) | PostboxError::Csrf)
    }
}
