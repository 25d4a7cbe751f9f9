//! Codec Module
//!
//! Serializes the whole key-value map to bytes and back.
//!
//! ## Frame Format
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ Magic: "VSKV" (4) | Version: u16 LE (2)                   │
//! ├───────────────────────────────────────────────────────────┤
//! │ Payload (variable): bincode-encoded map<string,string>    │
//! ├───────────────────────────────────────────────────────────┤
//! │ PayloadCRC: u32 LE (4)                                    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Map iteration order is not stable, so two encodings of the same map may
//! differ byte-wise; they always decode to equal maps.

mod map;

pub use map::{decode_map, encode_map};

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic bytes identifying an encoded vstore map
pub(crate) const MAGIC: &[u8; 4] = b"VSKV";

/// Current frame version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2)
pub(crate) const HEADER_SIZE: usize = 6;

/// Trailer size: PayloadCRC (4)
pub(crate) const TRAILER_SIZE: usize = 4;
