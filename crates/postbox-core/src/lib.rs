// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Postbox contact intake service.
//!
//! This crate provides the error type and domain types shared across the
//! Postbox workspace. Everything else (config, crypto, storage, server)
//! builds on top of these definitions.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PostboxError;
pub use types::{ContactRecord, NewContact};
