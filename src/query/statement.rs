//! Statement parser
//!
//! Turns `INSERT k v` / `SELECT k` text into a [`Command`].

use crate::error::{Result, VStoreError};

use super::Command;

/// Parse a statement string into a command
pub fn parse_statement(text: &str) -> Result<Command> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some(keyword) = tokens.first() else {
        return Err(VStoreError::Query("query is empty".to_string()));
    };

    match keyword.to_ascii_uppercase().as_str() {
        "INSERT" => {
            if tokens.len() != 3 {
                return Err(VStoreError::Query("invalid insert query format".to_string()));
            }
            Ok(Command::Insert {
                key: tokens[1].to_string(),
                value: tokens[2].to_string(),
            })
        }
        "SELECT" => {
            if tokens.len() != 2 {
                return Err(VStoreError::Query("invalid select query format".to_string()));
            }
            Ok(Command::Select {
                key: tokens[1].to_string(),
            })
        }
        _ => Err(VStoreError::Query("unknown query type".to_string())),
    }
}
