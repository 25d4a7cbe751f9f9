//! Index Module
//!
//! Inverted index over values: whitespace token → set of keys.
//!
//! ## Responsibilities
//! - Record every token of a value under its key on write
//! - Prune a key's old tokens on overwrite and delete
//! - Answer whole-token lookups without scanning the map
//!
//! Substring search and multi-term queries do not use this index; they scan
//! the map directly (see `query`).

mod inverted;

pub use inverted::SearchIndex;
