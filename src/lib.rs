//! # logkv
//!
//! A small durable key-value store with:
//! - An append-only log written before any in-memory change
//! - Deterministic recovery by replaying the log (last write wins)
//! - Escaped one-record-per-line text format
//! - Optional shared handle for multi-threaded callers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     KeyValueIndex                            │
//! │      validate → append to log → apply to HashMap             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │ startup replay          │ append
//!          ▼                         ▼
//!   ┌─────────────────────────────────────┐
//!   │              LogStore               │
//!   │     (append-only file, db.log)      │
//!   └─────────────────┬───────────────────┘
//!                     │ one line per record
//!                     ▼
//!              ┌─────────────┐
//!              │ RecordCodec │
//!              └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod wal;
pub mod index;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::{Config, RecoveryMode, SyncStrategy};
pub use index::{KeyValueIndex, RecoveryResult, SharedIndex};
pub use wal::LogStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of logkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
