//! Error types for vstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using VStoreError
pub type Result<T> = std::result::Result<T, VStoreError>;

/// Unified error type for vstore operations
#[derive(Debug, Error)]
pub enum VStoreError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("database not connected")]
    NotConnected,

    #[error("database already connected")]
    AlreadyConnected,

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    #[error("Key not found")]
    KeyNotFound,

    #[error("key must not be empty")]
    EmptyKey,

    // -------------------------------------------------------------------------
    // Crypto Errors
    // -------------------------------------------------------------------------
    #[error("encryption key not set")]
    CryptoNotConfigured,

    #[error("Cipher initialization failed: {0}")]
    CryptoInit(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Tag verification failed: wrong password, tampered or truncated file
    #[error("Authentication failed: store could not be decrypted")]
    Authentication,

    // -------------------------------------------------------------------------
    // Pipeline Errors
    // -------------------------------------------------------------------------
    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Statement Errors
    // -------------------------------------------------------------------------
    #[error("Query error: {0}")]
    Query(String),
}
