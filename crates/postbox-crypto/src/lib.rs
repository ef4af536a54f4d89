// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message encryption for the Postbox contact intake service.
//!
//! Submitted message bodies are sealed with AES-256-GCM before they reach
//! the storage layer. The key lives for the lifetime of the process and is
//! never persisted; see [`key::MessageCipher`] for how it is sourced.

pub mod cipher;
pub mod key;

pub use key::MessageCipher;
