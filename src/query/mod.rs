//! Query Module
//!
//! Value matching for search/query and the small statement language.
//!
//! ## Matching
//! - Exact: value contains the term as a substring (case-sensitive)
//! - Fuzzy: same, after lowercasing both sides
//! - Multi-term: every term must match (AND); no terms matches everything
//!
//! Hits are formatted as `"<key>: <value>"`.
//!
//! ## Statements
//! ```text
//! INSERT <key> <value>
//! SELECT <key>
//! ```
//! Keywords are case-insensitive; keys and values are single tokens.

mod command;
mod matcher;
mod statement;

pub use command::{Command, CommandType};
pub use matcher::{format_hit, matches_all, MatchMode};
pub use statement::parse_statement;
