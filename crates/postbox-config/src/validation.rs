// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and key
//! material shape.

use crate::diagnostic::ConfigError;
use crate::model::{Environment, PostboxConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PostboxConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate host is not empty and looks like an IP or hostname
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate secret key shape when present: 64 hex chars = 32 bytes
    if let Some(key) = &config.security.secret_key {
        if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            errors.push(ConfigError::Validation {
                message: "security.secret_key must be exactly 64 hex characters".to_string(),
            });
        }
    }

    // Production requires a configured key: an ephemeral key would make
    // every stored message unrecoverable after the next restart.
    if config.security.environment == Environment::Production
        && config.security.secret_key.is_none()
    {
        errors.push(ConfigError::Validation {
            message: "security.secret_key is required when security.environment = \"production\""
                .to_string(),
        });
    }

    if config.rate_limit.max_per_window == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.max_per_window must be at least 1".to_string(),
        });
    }

    if config.rate_limit.window_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "rate_limit.window_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
