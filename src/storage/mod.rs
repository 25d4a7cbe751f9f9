//! Storage Module
//!
//! Persists the whole key-value map to one file.
//!
//! ## Responsibilities
//! - Run the save pipeline: encode → compress → encrypt → write
//! - Run the load pipeline: read → decrypt → decompress → decode
//! - Replace the store file atomically (temp file + rename)
//! - Treat a missing file as an empty store
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Nonce (12)                             │
//! ├────────────────────────────────────────┤
//! │ AES-256-GCM sealed payload             │
//! │   └─ gzip stream                       │
//! │        └─ framed bincode map           │
//! │ Tag (16)                               │
//! └────────────────────────────────────────┘
//! ```

mod pipeline;

pub use pipeline::StorePipeline;
