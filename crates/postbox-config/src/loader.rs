// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./postbox.toml` > `~/.config/postbox/postbox.toml`
//! > `/etc/postbox/postbox.toml` with environment variable overrides via the
//! `POSTBOX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PostboxConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/postbox/postbox.toml` (system-wide)
/// 3. `~/.config/postbox/postbox.toml` (user XDG config)
/// 4. `./postbox.toml` (local directory)
/// 5. `POSTBOX_*` environment variables
pub fn load_config() -> Result<PostboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostboxConfig::default()))
        .merge(Toml::file("/etc/postbox/postbox.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("postbox/postbox.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("postbox.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PostboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostboxConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PostboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PostboxConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `POSTBOX_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`, and
/// `POSTBOX_RATE_LIMIT_MAX_PER_WINDOW` to `rate_limit.max_per_window`.
fn env_provider() -> Env {
    Env::prefixed("POSTBOX_").map(|key| {
        // `key` arrives in the variable's original (uppercase) casing with
        // the prefix stripped; normalize it before matching sections.
        let key_str = key.as_str().to_lowercase();
        // rate_limit must be mapped before the single-word sections so the
        // section underscore is not mistaken for a key separator.
        let mapped = key_str
            .replacen("rate_limit_", "rate_limit.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("security_", "security.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Environment;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[server]
port = 9000

[security]
environment = "production"
secret_key = "00deadbeef"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.security.environment, Environment::Production);
        assert_eq!(config.security.secret_key.as_deref(), Some("00deadbeef"));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.storage.database_path, "postbox.db");
        assert_eq!(config.rate_limit.max_per_window, 5);
    }

    #[test]
    fn env_vars_override_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "postbox.toml",
                r#"
[storage]
database_path = "from-file.db"
"#,
            )?;
            jail.set_env("POSTBOX_STORAGE_DATABASE_PATH", "from-env.db");
            jail.set_env("POSTBOX_RATE_LIMIT_MAX_PER_WINDOW", "3");
            jail.set_env("POSTBOX_SERVER_PORT", "9100");
            let config = load_config().expect("config should load");
            assert_eq!(config.storage.database_path, "from-env.db");
            assert_eq!(config.rate_limit.max_per_window, 3);
            assert_eq!(config.server.port, 9100);
            Ok(())
        });
    }
}
