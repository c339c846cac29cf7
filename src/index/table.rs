//! Key-value index
//!
//! HashMap-based index whose mutations go through the log first.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::config::{Config, RecoveryMode};
use crate::error::{KvError, Result};
use crate::wal::LogStore;
use crate::record::Operation;
use super::recovery::{self, RecoveryResult};

/// Authoritative in-memory key-value state backed by an append-only log
///
/// ## Lifecycle
/// - **Recovering**: construction replays the whole log into the map
/// - **Ready**: `insert` / `update` / `select` are served
///
/// Writes follow durability-before-visibility: the record is appended to the
/// log first, and the map changes only if the append succeeded. Validation
/// failures touch neither the log nor the map.
#[derive(Debug)]
pub struct KeyValueIndex {
    /// Durable log (exclusively owned by this index)
    store: LogStore,

    data: HashMap<String, String>,

    /// Stats from the replay that built `data`
    recovery: RecoveryResult,
}

impl KeyValueIndex {
    /// Open the log described by `config` and replay it
    pub fn open(config: Config) -> Result<Self> {
        let store = LogStore::open(&config.log_path, config.sync_strategy)?;
        Self::with_store(store, config.recovery_mode)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified log path
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().log_path(path.as_ref()).build();
        Self::open(config)
    }

    /// Build an index over an already opened log
    pub fn with_store(store: LogStore, mode: RecoveryMode) -> Result<Self> {
        let (data, recovery) = recovery::replay(&store, mode)?;

        tracing::info!(
            path = %store.path().display(),
            applied = recovery.records_applied,
            ignored = recovery.records_ignored,
            skipped = recovery.lines_skipped,
            keys = recovery.keys_recovered,
            "Recovered index from log"
        );

        Ok(Self {
            store,
            data,
            recovery,
        })
    }

    /// Insert a key that must not exist yet
    pub fn insert(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KvError::EmptyKey);
        }
        if self.data.contains_key(key) {
            return Err(KvError::DuplicateKey(key.to_string()));
        }

        self.store.append(Operation::Insert, key, value)?;
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Replace the value of a key that must already exist
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KvError::EmptyKey);
        }
        let slot = self
            .data
            .get_mut(key)
            .ok_or_else(|| KvError::KeyNotFound(key.to_string()))?;

        self.store.append(Operation::Update, key, value)?;
        *slot = value.to_string();
        Ok(())
    }

    /// Look up a key; `None` if absent
    pub fn select(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over key/value pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sorted copy of the current state
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Stats from the startup replay
    pub fn recovery(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// The underlying log
    pub fn store(&self) -> &LogStore {
        &self.store
    }
}
