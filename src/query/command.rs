//! Command definitions
//!
//! Parsed statements ready to run against a `Database`.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Insert,
    Select,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upsert a key-value pair
    Insert { key: String, value: String },

    /// Read a value by key
    Select { key: String },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Insert { .. } => CommandType::Insert,
            Command::Select { .. } => CommandType::Select,
        }
    }

    /// Whether running this command mutates the store
    pub fn is_write(&self) -> bool {
        matches!(self, Command::Insert { .. })
    }
}
