// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the
//! system CSPRNG. Nonce reuse would be catastrophic for GCM security.

use postbox_core::PostboxError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

/// Nonce length in bytes (96 bits, the GCM standard).
pub const NONCE_LEN: usize = 12;

/// Authentication tag length appended by seal.
pub const TAG_LEN: usize = 16;

/// Encrypt plaintext with AES-256-GCM using a random 96-bit nonce.
///
/// Returns `nonce || ciphertext || tag` as a single buffer, so the output is
/// self-contained: [`open`] recovers the nonce from the prefix.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>, PostboxError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| PostboxError::Crypto("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    // Generate random 96-bit nonce.
    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| PostboxError::Crypto("failed to generate random nonce".to_string()))?;

    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: plaintext buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    less_safe
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| PostboxError::Crypto("AES-256-GCM encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + in_out.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&in_out);
    Ok(out)
}

/// Decrypt a buffer produced by [`seal`].
///
/// `sealed` must be `nonce || ciphertext || tag`. Returns the plaintext, or
/// an error if the key is wrong or the data was tampered with. The request
/// path never calls this; it exists for tests and out-of-band recovery.
pub fn open(key: &[u8; 32], sealed: &[u8]) -> Result<Vec<u8>, PostboxError> {
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(PostboxError::Crypto(
            "sealed buffer too short to contain nonce and tag".to_string(),
        ));
    }

    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| PostboxError::Crypto("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(&sealed[..NONCE_LEN]);
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = sealed[NONCE_LEN..].to_vec();
    let plaintext = less_safe
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| {
            PostboxError::Crypto(
                "AES-256-GCM decryption failed -- wrong key or corrupted data".to_string(),
            )
        })?;

    Ok(plaintext.to_vec())
}

/// Generate a random 32-byte key suitable for AES-256-GCM.
pub fn generate_random_key() -> Result<[u8; 32], PostboxError> {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    rng.fill(&mut key)
        .map_err(|_| PostboxError::Crypto("failed to generate random key".to_string()))?;
    Ok(key)
}
