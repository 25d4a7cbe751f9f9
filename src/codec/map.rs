//! Map encoding
//!
//! bincode payload wrapped in a magic/version header and a CRC32 trailer.

use std::collections::HashMap;

use crate::error::{Result, VStoreError};

use super::{HEADER_SIZE, MAGIC, TRAILER_SIZE, VERSION};

/// Encode a map into a framed byte vector
pub fn encode_map(map: &HashMap<String, String>) -> Result<Vec<u8>> {
    let payload = bincode::serialize(map)
        .map_err(|e| VStoreError::Serialization(format!("Failed to encode map: {}", e)))?;

    let crc = crc32fast::hash(&payload);

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len() + TRAILER_SIZE);
    frame.extend_from_slice(MAGIC);
    frame.extend_from_slice(&VERSION.to_le_bytes());
    frame.extend_from_slice(&payload);
    frame.extend_from_slice(&crc.to_le_bytes());

    Ok(frame)
}

/// Decode a framed byte vector back into a map
///
/// Fails with `Serialization` on a short frame, bad magic, unknown version,
/// checksum mismatch, or a payload bincode cannot read.
pub fn decode_map(bytes: &[u8]) -> Result<HashMap<String, String>> {
    if bytes.len() < HEADER_SIZE + TRAILER_SIZE {
        return Err(VStoreError::Serialization(format!(
            "Frame too short: {} bytes (min {})",
            bytes.len(),
            HEADER_SIZE + TRAILER_SIZE
        )));
    }

    if &bytes[0..4] != MAGIC {
        return Err(VStoreError::Serialization("Invalid magic bytes".to_string()));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(VStoreError::Serialization(format!(
            "Unsupported frame version: {}",
            version
        )));
    }

    let crc_start = bytes.len() - TRAILER_SIZE;
    let payload = &bytes[HEADER_SIZE..crc_start];
    let stored_crc = u32::from_le_bytes([
        bytes[crc_start],
        bytes[crc_start + 1],
        bytes[crc_start + 2],
        bytes[crc_start + 3],
    ]);

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != stored_crc {
        return Err(VStoreError::Serialization(format!(
            "Checksum mismatch: expected {:08x}, got {:08x}",
            stored_crc, actual_crc
        )));
    }

    bincode::deserialize(payload)
        .map_err(|e| VStoreError::Serialization(format!("Failed to decode map: {}", e)))
}
