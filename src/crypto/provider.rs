//! Crypto provider
//!
//! Holds the active cipher derived from a password.

use std::fmt;

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Result, VStoreError};

use super::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Password-derived AES-256-GCM cipher
#[derive(Clone)]
pub struct CryptoProvider {
    cipher: Aes256Gcm,
}

impl fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoProvider").finish_non_exhaustive()
    }
}

impl CryptoProvider {
    /// Derive a key from `password` and initialize the cipher
    pub fn from_password(password: &str) -> Result<Self> {
        let key: [u8; KEY_SIZE] = Sha256::digest(password.as_bytes()).into();
        Self::from_key(&key)
    }

    /// Initialize the cipher from raw key bytes
    ///
    /// Fails with `CryptoInit` unless `key` is exactly 32 bytes.
    pub fn from_key(key: &[u8]) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| {
            VStoreError::CryptoInit(format!(
                "invalid key length: {} bytes (expected {})",
                key.len(),
                KEY_SIZE
            ))
        })?;
        Ok(Self { cipher })
    }

    /// Seal `plaintext` under a fresh random nonce
    ///
    /// Returns `nonce || ciphertext || tag`. Sealing only fails for inputs
    /// beyond the GCM length limit, reported as `Encryption`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| VStoreError::Encryption(e.to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_SIZE + sealed.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&sealed);
        Ok(blob)
    }

    /// Open a blob produced by [`encrypt`](Self::encrypt)
    ///
    /// Any failure (short input, wrong key, flipped bit) is `Authentication`;
    /// no plaintext is returned in that case.
    pub fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < NONCE_SIZE + TAG_SIZE {
            return Err(VStoreError::Authentication);
        }

        let (nonce_bytes, sealed) = blob.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(Nonce::from_slice(nonce_bytes), sealed)
            .map_err(|_| VStoreError::Authentication)
    }
}
