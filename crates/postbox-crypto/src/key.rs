// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-lifetime message cipher and key sourcing.
//!
//! The key is held only in memory and zeroized on drop. When no key is
//! configured (development mode), an ephemeral one is generated at startup;
//! everything sealed under it becomes unrecoverable once the process exits.

use postbox_config::model::{Environment, SecurityConfig};
use postbox_core::PostboxError;
use tracing::warn;
use zeroize::Zeroizing;

use crate::cipher;

/// AES-256-GCM cipher bound to a process-lifetime key.
///
/// Built once at startup from [`SecurityConfig`] and shared read-only across
/// request handlers. Concurrent use is safe: sealing never mutates the key.
pub struct MessageCipher {
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for MessageCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageCipher")
            .field("key", &"[redacted]")
            .finish()
    }
}

impl MessageCipher {
    /// Build a cipher from the security configuration.
    ///
    /// With `secret_key` set, the 64-hex-char value is decoded into the key.
    /// Without it, production mode is a hard error (config validation also
    /// rejects this earlier) and development mode generates an ephemeral key
    /// with a loud warning about ciphertext loss across restarts.
    pub fn from_config(security: &SecurityConfig) -> Result<Self, PostboxError> {
        match &security.secret_key {
            Some(hex_key) => {
                let bytes = hex::decode(hex_key).map_err(|_| {
                    PostboxError::Config(
                        "security.secret_key is not valid hex".to_string(),
                    )
                })?;
                let key: [u8; 32] = bytes.try_into().map_err(|_| {
                    PostboxError::Config(
                        "security.secret_key must decode to exactly 32 bytes".to_string(),
                    )
                })?;
                Ok(Self {
                    key: Zeroizing::new(key),
                })
            }
            None if security.environment == Environment::Production => Err(PostboxError::Config(
                "security.secret_key is required in production".to_string(),
            )),
            None => {
                warn!(
                    "no security.secret_key configured -- generated an ephemeral key; \
                     stored messages will be unrecoverable after restart"
                );
                Self::ephemeral()
            }
        }
    }

    /// Build a cipher with a freshly generated random key.
    pub fn ephemeral() -> Result<Self, PostboxError> {
        Ok(Self {
            key: Zeroizing::new(cipher::generate_random_key()?),
        })
    }

    /// Seal a message body. Output is `nonce || ciphertext || tag`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PostboxError> {
        cipher::seal(&self.key, plaintext)
    }

    /// Open a sealed message body. Not used on the request path.
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, PostboxError> {
        cipher::open(&self.key, sealed)
    }
}
