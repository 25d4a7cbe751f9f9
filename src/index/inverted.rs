//! Inverted index implementation

use std::collections::{BTreeSet, HashMap};

/// Token → keys index kept in step with the key-value map
#[derive(Debug, Default)]
pub struct SearchIndex {
    postings: HashMap<String, BTreeSet<String>>,
}

impl SearchIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over every entry of `data`
    pub fn from_map(data: &HashMap<String, String>) -> Self {
        let mut index = Self::new();
        for (key, value) in data {
            index.insert(key, value);
        }
        index
    }

    /// Record `key` under every whitespace token of `value`
    pub fn insert(&mut self, key: &str, value: &str) {
        for token in value.split_whitespace() {
            self.postings
                .entry(token.to_string())
                .or_default()
                .insert(key.to_string());
        }
    }

    /// Drop `key` from every token of its previous `value`
    ///
    /// Tokens left with no keys are removed.
    pub fn remove(&mut self, key: &str, value: &str) {
        for token in value.split_whitespace() {
            if let Some(keys) = self.postings.get_mut(token) {
                keys.remove(key);
                if keys.is_empty() {
                    self.postings.remove(token);
                }
            }
        }
    }

    /// Keys whose value contains `token` as a whole token, in key order
    pub fn lookup(&self, token: &str) -> Vec<&str> {
        self.postings
            .get(token)
            .map(|keys| keys.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of distinct tokens
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    /// Check if the index holds no tokens
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.postings.clear();
    }
}
