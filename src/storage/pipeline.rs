//! Store pipeline
//!
//! Orchestrates codec, compression and crypto around the store file.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::codec::{decode_map, encode_map};
use crate::compression::{compress, decompress};
use crate::crypto::CryptoProvider;
use crate::error::{Result, VStoreError};

/// Reads and writes the single store file
#[derive(Debug, Clone)]
pub struct StorePipeline {
    /// Destination of every save
    file_path: PathBuf,

    /// Gzip level for saves
    compression_level: u32,
}

impl StorePipeline {
    /// Create a pipeline for `file_path`
    pub fn new(file_path: impl Into<PathBuf>, compression_level: u32) -> Self {
        Self {
            file_path: file_path.into(),
            compression_level,
        }
    }

    /// Persist `data` under `crypto`, replacing the file atomically
    ///
    /// Steps:
    /// 1. Encode, compress and encrypt in memory
    /// 2. Write the blob to a temp file next to the destination and fsync
    /// 3. Rename the temp file over the destination
    ///
    /// If any step fails the destination is left untouched and the temp file
    /// is removed when its guard drops. Returns the number of bytes written.
    pub fn save(&self, data: &HashMap<String, String>, crypto: &CryptoProvider) -> Result<usize> {
        let encoded = encode_map(data)?;
        let compressed = compress(&encoded, self.compression_level)?;
        let blob = crypto.encrypt(&compressed)?;

        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&blob)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.file_path)
            .map_err(|e| VStoreError::Io(e.error))?;

        tracing::debug!(
            "Saved {} entries to {} ({} encoded, {} compressed, {} on disk)",
            data.len(),
            self.file_path.display(),
            encoded.len(),
            compressed.len(),
            blob.len()
        );

        Ok(blob.len())
    }

    /// Load the map stored in the file, or an empty map if there is none
    pub fn load(&self, crypto: &CryptoProvider) -> Result<HashMap<String, String>> {
        let blob = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No store file at {}, starting empty", self.file_path.display());
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let compressed = crypto.decrypt(&blob)?;
        let encoded = decompress(&compressed)?;
        let data = decode_map(&encoded)?;

        tracing::debug!(
            "Loaded {} entries from {} ({} bytes on disk)",
            data.len(),
            self.file_path.display(),
            blob.len()
        );

        Ok(data)
    }

    /// Get the store file path
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Directory the temp file is created in (same filesystem as the target)
    fn parent_dir(&self) -> &Path {
        match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}
