//! Append-Only Log Module
//!
//! Provides durability by appending every mutation to a log file
//! before it becomes visible in memory.
//!
//! ## Responsibilities
//! - Create the log file on first use
//! - Append one encoded record per line
//! - Read every record back in file order for recovery
//!
//! ## File Handling
//! The file is opened per append and per read and closed when that call
//! returns; no handle is kept between calls.

mod reader;
mod store;

pub use reader::{LogEntries, LogLine};
pub use store::LogStore;
