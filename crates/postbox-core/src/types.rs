// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types for the Postbox contact intake service.

use serde::{Deserialize, Serialize};

/// A validated, encrypted submission ready to be persisted.
///
/// `message` is the ciphertext produced by the message cipher
/// (12-byte nonce prefix followed by AES-256-GCM ciphertext and tag).
/// The plaintext never reaches the storage layer.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: Vec<u8>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// One persisted contact submission row.
///
/// Records are immutable once written; there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Auto-assigned monotonic row id.
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Ciphertext of the submitted message.
    pub message: Vec<u8>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}
