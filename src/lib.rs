//! # vstore
//!
//! A single-node, password-protected key-value store with:
//! - An in-memory string map guarded by one reader/writer lock
//! - Synchronous persistence of the whole map to a single file
//! - Gzip compression and AES-256-GCM encryption at rest
//! - Substring, case-insensitive and multi-term search over values
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Database                              │
//! │      (connection state, RwLock, CRUD, search/query)          │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌─────────────────────────┐       ┌─────────────────┐
//!   │     StorePipeline        │       │  SearchIndex    │
//!   │  (save / load, atomic)   │       │ (token → keys)  │
//!   └────────────┬────────────┘       └─────────────────┘
//!                │
//!     ┌──────────┼──────────────┐
//!     ▼          ▼              ▼
//! ┌────────┐ ┌──────────┐ ┌──────────────┐
//! │ Codec  │ │  Gzip    │ │ AES-256-GCM  │
//! │(bincode│ │(flate2)  │ │ (CryptoProv.)│
//! └────────┘ └──────────┘ └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod compression;
pub mod crypto;
pub mod index;
pub mod query;
pub mod storage;
pub mod database;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, VStoreError};
pub use config::Config;
pub use database::{ConnectionState, Database};
pub use query::{parse_statement, Command};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
