//! Crypto Module
//!
//! Key derivation and authenticated encryption for the store file.
//!
//! ## Scheme
//! - Key: SHA-256 of the password bytes (32 bytes)
//! - Cipher: AES-256-GCM
//! - Nonce: 12 random bytes from the OS RNG, fresh per encryption
//!
//! ## Blob Layout
//! ```text
//! ┌─────────────┬──────────────────────────────┬───────────┐
//! │ Nonce (12)  │ Ciphertext (len(plaintext))  │ Tag (16)  │
//! └─────────────┴──────────────────────────────┴───────────┘
//! ```

mod provider;

pub use provider::CryptoProvider;

/// Derived key length in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// GCM nonce length in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag length in bytes
pub const TAG_SIZE: usize = 16;
