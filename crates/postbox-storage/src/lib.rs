// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Postbox contact intake service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed insert
//! operations for contact records. The submission handler only ever
//! appends; read helpers exist for tests and out-of-band administration.

pub mod database;
pub mod migrations;
pub mod queries;

pub use database::Database;
