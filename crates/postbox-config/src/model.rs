// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Postbox.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup instead of silently ignoring them.

use serde::{Deserialize, Serialize};

/// Top-level Postbox configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to values
/// suitable for local development.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PostboxConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Secret key and environment mode settings.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Submission rate limiting settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "postbox.db".to_string()
}

/// Deployment environment mode.
///
/// In `Production` mode a missing or malformed secret key aborts startup;
/// in `Development` mode an ephemeral key is generated with a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Secret key and environment mode configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Message encryption key as 64 hex characters (32 bytes).
    ///
    /// Required in production mode. When absent in development mode an
    /// ephemeral key is generated at startup, which makes any previously
    /// stored ciphertext unrecoverable after a restart.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Deployment environment mode.
    #[serde(default)]
    pub environment: Environment,
}

/// Submission rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Maximum submissions per client within one window.
    #[serde(default = "default_max_per_window")]
    pub max_per_window: u32,

    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Use the first `X-Forwarded-For` entry as the client identity.
    ///
    /// Only enable behind a reverse proxy that overwrites the header;
    /// otherwise clients can pick their own rate-limit bucket. When false
    /// the peer socket address is used.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_per_window: default_max_per_window(),
            window_secs: default_window_secs(),
            trust_forwarded_for: false,
        }
    }
}

fn default_max_per_window() -> u32 {
    5
}

fn default_window_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development_friendly() {
        let config = PostboxConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.database_path, "postbox.db");
        assert_eq!(config.security.environment, Environment::Development);
        assert!(config.security.secret_key.is_none());
        assert_eq!(config.rate_limit.max_per_window, 5);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert!(!config.rate_limit.trust_forwarded_for);
    }

    #[test]
    fn environment_deserializes_lowercase() {
        let toml_str = r#"
[security]
environment = "production"
"#;
        let config: PostboxConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.security.environment, Environment::Production);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[server]
hosty = "0.0.0.0"
"#;
        let result = toml::from_str::<PostboxConfig>(toml_str);
        assert!(result.is_err());
    }
}
