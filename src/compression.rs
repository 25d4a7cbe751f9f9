//! Gzip compression
//!
//! Wraps the encoded map before encryption and unwraps it after decryption.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Result, VStoreError};

/// Compress bytes into a gzip stream at the given level (0..=9)
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2), Compression::new(level));
    encoder
        .write_all(data)
        .map_err(|e| VStoreError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| VStoreError::Compression(e.to_string()))
}

/// Decompress a gzip stream
///
/// Bad headers, corrupt blocks and truncated streams all surface as
/// `Compression`.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| VStoreError::Compression(e.to_string()))?;
    Ok(decompressed)
}
