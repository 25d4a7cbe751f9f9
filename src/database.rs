//! Database Module
//!
//! The storage engine that coordinates all components.
//!
//! ## Responsibilities
//! - Gate data access on the connection state
//! - Load the map on connect, persist it on every write and on disconnect
//! - Keep the inverted index in step with the map
//! - Serve lookups, substring search and multi-term queries

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::config::{Config, DEFAULT_COMPRESSION_LEVEL};
use crate::crypto::CryptoProvider;
use crate::error::{Result, VStoreError};
use crate::index::SearchIndex;
use crate::query::{format_hit, matches_all, Command, MatchMode};
use crate::storage::StorePipeline;

/// Connection state of a [`Database`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Initial state; no data is held in memory
    Disconnected,

    /// Map loaded and accepting reads and writes
    Connected,
}

/// State guarded by the database lock
struct Inner {
    state: ConnectionState,
    data: HashMap<String, String>,
    search_index: SearchIndex,
    crypto: Option<CryptoProvider>,
}

impl Inner {
    fn ensure_connected(&self) -> Result<()> {
        match self.state {
            ConnectionState::Connected => Ok(()),
            ConnectionState::Disconnected => Err(VStoreError::NotConnected),
        }
    }

    fn crypto(&self) -> Result<&CryptoProvider> {
        self.crypto.as_ref().ok_or(VStoreError::CryptoNotConfigured)
    }

    /// Upsert into the map and reindex the key
    fn upsert(&mut self, key: &str, value: &str) {
        if let Some(old) = self.data.insert(key.to_string(), value.to_string()) {
            self.search_index.remove(key, &old);
        }
        self.search_index.insert(key, value);
    }

    /// Collect formatted hits for every value matching all `terms`
    fn scan<S: AsRef<str>>(&self, terms: &[S], mode: MatchMode) -> Vec<String> {
        self.data
            .iter()
            .filter(|(_, value)| matches_all(value, terms, mode))
            .map(|(key, value)| format_hit(key, value))
            .collect()
    }
}

/// A password-protected key-value store backed by a single file
///
/// ## Concurrency Model: one reader/writer lock
///
/// - **Reads** (get/search/query): shared lock, any number at once
/// - **Writes** (set/update/delete/connect/disconnect/rekey): exclusive lock
///   held for the whole call, including encryption and file I/O
///
/// `is_connected` reads an atomic mirror of the state and never waits on
/// the lock.
pub struct Database {
    /// Save/load pipeline for the store file
    pipeline: StorePipeline,

    /// Map, index, key material and connection state
    inner: RwLock<Inner>,

    /// Mirror of `inner.state`, written only while the write lock is held
    connected: AtomicBool,
}

impl Database {
    /// Open a database from config, deriving the key from its password
    ///
    /// The database starts disconnected; call [`connect`](Self::connect).
    pub fn open(config: Config) -> Result<Self> {
        let crypto = CryptoProvider::from_password(&config.password)?;
        tracing::info!("Opened store at {}", config.file_path.display());

        Ok(Self::build(
            StorePipeline::new(config.file_path, config.compression_level),
            Some(crypto),
        ))
    }

    /// Create a database with no key material
    ///
    /// [`set_encryption_key`](Self::set_encryption_key) must be called before
    /// [`connect`](Self::connect) can succeed.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self::build(StorePipeline::new(file_path, DEFAULT_COMPRESSION_LEVEL), None)
    }

    fn build(pipeline: StorePipeline, crypto: Option<CryptoProvider>) -> Self {
        Self {
            pipeline,
            inner: RwLock::new(Inner {
                state: ConnectionState::Disconnected,
                data: HashMap::new(),
                search_index: SearchIndex::new(),
                crypto,
            }),
            connected: AtomicBool::new(false),
        }
    }

    // =========================================================================
    // Key Material
    // =========================================================================

    /// Derive new key material from `password`
    ///
    /// While connected the store is re-encrypted under the new key before it
    /// is installed; if that save fails the old key stays active and the
    /// error is returned. While disconnected the key is only replaced.
    pub fn set_encryption_key(&self, password: &str) -> Result<()> {
        let crypto = CryptoProvider::from_password(password)?;
        let mut inner = self.inner.write();

        if inner.state == ConnectionState::Connected {
            if let Err(e) = self.pipeline.save(&inner.data, &crypto) {
                tracing::warn!("Re-encryption under new key failed, keeping old key: {}", e);
                return Err(e);
            }
            tracing::info!("Store re-encrypted under new key");
        } else {
            tracing::info!("Encryption key replaced");
        }

        inner.crypto = Some(crypto);
        Ok(())
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Load the store file and start accepting data operations
    ///
    /// A missing file yields an empty store. On any failure the database
    /// stays disconnected and the call may be retried.
    pub fn connect(&self) -> Result<()> {
        let mut inner = self.inner.write();

        if inner.state == ConnectionState::Connected {
            return Err(VStoreError::AlreadyConnected);
        }

        let data = self.pipeline.load(inner.crypto()?)?;

        inner.search_index = SearchIndex::from_map(&data);
        inner.data = data;
        inner.state = ConnectionState::Connected;
        self.connected.store(true, Ordering::Release);

        tracing::info!(
            "Connected to {} ({} entries, {} indexed tokens)",
            self.pipeline.file_path().display(),
            inner.data.len(),
            inner.search_index.token_count()
        );
        Ok(())
    }

    /// Persist the store, drop in-memory state and disconnect
    ///
    /// If the save fails the database stays connected with its data intact.
    pub fn disconnect(&self) -> Result<()> {
        let mut inner = self.inner.write();
        inner.ensure_connected()?;

        if let Err(e) = self.pipeline.save(&inner.data, inner.crypto()?) {
            tracing::warn!("Save on disconnect failed, staying connected: {}", e);
            return Err(e);
        }

        inner.data.clear();
        inner.search_index.clear();
        inner.state = ConnectionState::Disconnected;
        self.connected.store(false, Ordering::Release);

        tracing::info!("Disconnected from {}", self.pipeline.file_path().display());
        Ok(())
    }

    /// Alias of [`disconnect`](Self::disconnect)
    pub fn close(&self) -> Result<()> {
        self.disconnect()
    }

    /// Check whether the database is connected (never blocks)
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Get the current connection state (never blocks)
    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Upsert a key-value pair and persist the store
    ///
    /// If the save fails the value is still set in memory; the error is
    /// returned so the caller can retry or disconnect.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(VStoreError::EmptyKey);
        }

        let mut inner = self.inner.write();
        inner.ensure_connected()?;

        inner.upsert(key, value);
        tracing::trace!("set {}", key);

        self.persist(&inner)
    }

    /// Replace the value of an existing key and persist the store
    pub fn update(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(VStoreError::EmptyKey);
        }

        let mut inner = self.inner.write();
        inner.ensure_connected()?;

        if !inner.data.contains_key(key) {
            return Err(VStoreError::KeyNotFound);
        }

        inner.upsert(key, value);
        tracing::trace!("update {}", key);

        self.persist(&inner)
    }

    /// Remove a key and persist the store
    pub fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write();
        inner.ensure_connected()?;

        let old = inner.data.remove(key).ok_or(VStoreError::KeyNotFound)?;
        inner.search_index.remove(key, &old);
        tracing::trace!("delete {}", key);

        self.persist(&inner)
    }

    /// Run a parsed statement
    ///
    /// `Insert` returns `None`; `Select` returns the value.
    pub fn execute(&self, command: Command) -> Result<Option<String>> {
        tracing::debug!(
            "execute {:?} (write: {})",
            command.command_type(),
            command.is_write()
        );

        match command {
            Command::Insert { key, value } => {
                self.set(&key, &value)?;
                Ok(None)
            }
            Command::Select { key } => self.get(&key).map(Some),
        }
    }

    /// Save the store (called with the write lock held)
    fn persist(&self, inner: &Inner) -> Result<()> {
        match self.pipeline.save(&inner.data, inner.crypto()?) {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!("Failed to persist store: {}", e);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a value by key
    pub fn get(&self, key: &str) -> Result<String> {
        let inner = self.inner.read();
        inner.ensure_connected()?;

        inner.data.get(key).cloned().ok_or(VStoreError::KeyNotFound)
    }

    /// Get `{id: value}` if the value of `id` contains `pivot_key`
    ///
    /// Looks up by exact key, then filters by substring.
    pub fn get_with_pivot(&self, id: &str, pivot_key: &str) -> Result<HashMap<String, String>> {
        let inner = self.inner.read();
        inner.ensure_connected()?;

        match inner.data.get(id) {
            Some(value) if value.contains(pivot_key) => {
                Ok(HashMap::from([(id.to_string(), value.clone())]))
            }
            _ => Err(VStoreError::KeyNotFound),
        }
    }

    /// Get a copy of the whole map
    pub fn get_all(&self) -> Result<HashMap<String, String>> {
        let inner = self.inner.read();
        inner.ensure_connected()?;

        Ok(inner.data.clone())
    }

    /// Number of entries in the store
    pub fn len(&self) -> Result<usize> {
        let inner = self.inner.read();
        inner.ensure_connected()?;

        Ok(inner.data.len())
    }

    // =========================================================================
    // Search & Query
    // =========================================================================

    /// Values containing `keyword` (case-sensitive)
    pub fn search(&self, keyword: &str) -> Result<Vec<String>> {
        self.query(&[keyword])
    }

    /// Values containing `keyword`, ignoring case
    pub fn search_fuzzy(&self, keyword: &str) -> Result<Vec<String>> {
        self.query_fuzzy(&[keyword])
    }

    /// Values containing every term (case-sensitive); no terms matches all
    pub fn query<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<String>> {
        let inner = self.inner.read();
        inner.ensure_connected()?;

        Ok(inner.scan(terms, MatchMode::Exact))
    }

    /// Values containing every term, ignoring case
    pub fn query_fuzzy<S: AsRef<str>>(&self, terms: &[S]) -> Result<Vec<String>> {
        let inner = self.inner.read();
        inner.ensure_connected()?;

        Ok(inner.scan(terms, MatchMode::Fuzzy))
    }

    /// Values containing `token` as a whole whitespace-delimited token
    ///
    /// Answered from the inverted index; hits are sorted by key.
    pub fn search_token(&self, token: &str) -> Result<Vec<String>> {
        let inner = self.inner.read();
        inner.ensure_connected()?;

        Ok(inner
            .search_index
            .lookup(token)
            .into_iter()
            .filter_map(|key| inner.data.get(key).map(|value| format_hit(key, value)))
            .collect())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the store file path
    pub fn file_path(&self) -> &Path {
        self.pipeline.file_path()
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        if inner.state != ConnectionState::Connected {
            return;
        }

        let saved = inner
            .crypto
            .as_ref()
            .ok_or(VStoreError::CryptoNotConfigured)
            .and_then(|crypto| self.pipeline.save(&inner.data, crypto));

        if let Err(e) = saved {
            tracing::warn!("Failed to save store on drop: {}", e);
        }
    }
}
