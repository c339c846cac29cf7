//! Shared index handle
//!
//! Lets several threads use one index. Every call holds a single mutex, so a
//! mutation's validation, log append and in-memory apply form one unit and
//! the log order always matches the apply order.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use super::{KeyValueIndex, RecoveryResult};

/// Cloneable, thread-safe handle to one [`KeyValueIndex`]
#[derive(Debug, Clone)]
pub struct SharedIndex {
    inner: Arc<Mutex<KeyValueIndex>>,
}

impl SharedIndex {
    /// Open and replay the log described by `config`
    pub fn open(config: Config) -> Result<Self> {
        Ok(Self::new(KeyValueIndex::open(config)?))
    }

    pub fn new(index: KeyValueIndex) -> Self {
        Self {
            inner: Arc::new(Mutex::new(index)),
        }
    }

    pub fn insert(&self, key: &str, value: &str) -> Result<()> {
        self.inner.lock().insert(key, value)
    }

    pub fn update(&self, key: &str, value: &str) -> Result<()> {
        self.inner.lock().update(key, value)
    }

    /// Look up a key; the value is copied out so the lock is not held
    pub fn select(&self, key: &str) -> Option<String> {
        self.inner.lock().select(key).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.lock().snapshot()
    }

    pub fn recovery(&self) -> RecoveryResult {
        self.inner.lock().recovery().clone()
    }
}
