// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `postbox serve` command implementation.
//!
//! Wires the collaborators together: message cipher from config, WAL-mode
//! SQLite with schema ensured on open, shared server state, axum server.

use postbox_config::model::PostboxConfig;
use postbox_core::PostboxError;
use postbox_crypto::MessageCipher;
use postbox_server::server::start_server;
use postbox_server::AppState;
use postbox_storage::Database;
use tracing::info;

/// Runs the `postbox serve` command.
pub async fn run_serve(config: PostboxConfig) -> Result<(), PostboxError> {
    init_tracing(&config.server.log_level);

    info!("starting postbox serve");

    // Key setup first: in production a missing key must abort before we
    // touch the database.
    let cipher = MessageCipher::from_config(&config.security)?;

    let db = Database::open(&config.storage.database_path).await?;

    let state = AppState::new(&config, db, cipher);
    start_server(&config.server.host, config.server.port, state).await
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postbox={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
