//! Configuration for vstore
//!
//! Centralized configuration. The password has no default: it must be
//! supplied explicitly by whoever builds the config.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, VStoreError};

/// Default gzip level (flate2's balanced setting)
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest gzip level accepted
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Main configuration for a vstore instance
#[derive(Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The single backing file for the whole store
    pub file_path: PathBuf,

    /// Gzip level used when saving (0 = store, 9 = best)
    pub compression_level: u32,

    // -------------------------------------------------------------------------
    // Crypto Configuration
    // -------------------------------------------------------------------------
    /// Password the encryption key is derived from
    pub password: String,
}

// Keep the password out of debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("file_path", &self.file_path)
            .field("compression_level", &self.compression_level)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
pub struct ConfigBuilder {
    file_path: PathBuf,
    compression_level: u32,
    password: Option<String>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("./vstore.data"),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            password: None,
        }
    }
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = path.into();
        self
    }

    /// Set the gzip level (clamped to 0..=9)
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(MAX_COMPRESSION_LEVEL);
        self
    }

    /// Set the password used to derive the encryption key
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Finish the config; fails if no non-empty password was given
    pub fn build(self) -> Result<Config> {
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            Some(_) => return Err(VStoreError::Config("password must not be empty".to_string())),
            None => return Err(VStoreError::Config("password is required".to_string())),
        };

        Ok(Config {
            file_path: self.file_path,
            compression_level: self.compression_level,
            password,
        })
    }
}
