//! Configuration for logkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a logkv store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// Path of the append-only log file
    pub log_path: PathBuf,

    /// Sync strategy: whether to fsync after each append
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Recovery Configuration
    // -------------------------------------------------------------------------
    /// What to do with undecodable lines during replay
    pub recovery_mode: RecoveryMode,
}

/// Log sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every append (safest, slowest)
    EveryWrite,

    /// Flush to the OS and let it decide when to hit the disk
    OsBuffered,
}

/// Recovery behavior when a log line cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Abort startup on the first malformed line
    #[default]
    Strict,

    /// Log and skip malformed lines; I/O errors still abort
    SkipMalformed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("db.log"),
            sync_strategy: SyncStrategy::OsBuffered,
            recovery_mode: RecoveryMode::Strict,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the recovery mode
    pub fn recovery_mode(mut self, mode: RecoveryMode) -> Self {
        self.config.recovery_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
