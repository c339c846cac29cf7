//! Log store
//!
//! Owns the log file path; appends records and reads them back.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::Result;
use crate::record::{encode, DecodedFields, LogRecord, Operation};
use super::LogEntries;

/// Append-only log of encoded records
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
    sync_strategy: SyncStrategy,
}

impl LogStore {
    /// Open the log at `path`, creating an empty file if none exists
    ///
    /// An existing file is left untouched.
    pub fn open(path: impl AsRef<Path>, sync_strategy: SyncStrategy) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }

            // create(true) without truncate: a file that appeared since the
            // exists() check keeps its content
            OpenOptions::new().create(true).append(true).open(&path)?;
            tracing::info!(path = %path.display(), "Initialized log file");
        }

        Ok(Self {
            path,
            sync_strategy,
        })
    }

    /// Append one record and return it
    ///
    /// The in-memory state must only change after this returns `Ok`.
    pub fn append(&self, operation: Operation, key: &str, value: &str) -> Result<LogRecord> {
        let record = LogRecord::new(operation, key, value);

        let mut line = encode(&record.to_fields());
        line.push('\n');

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        if self.sync_strategy == SyncStrategy::EveryWrite {
            file.sync_data()?;
        }

        tracing::debug!(op = %operation, key, "Appended log record");
        Ok(record)
    }

    /// Read every record in file order
    ///
    /// A missing file reads as empty. Any I/O error or malformed line aborts
    /// the whole read.
    pub fn read_all(&self) -> Result<Vec<DecodedFields>> {
        let mut records = Vec::new();
        for entry in self.entries()? {
            records.push(entry?.fields);
        }
        Ok(records)
    }

    /// Stream decoded lines from the start of the file
    pub fn entries(&self) -> Result<LogEntries> {
        LogEntries::open(&self.path)
    }

    /// Number of non-blank lines currently in the log
    pub fn line_count(&self) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }

        let content = fs::read(&self.path)?;
        Ok(content
            .split(|b| *b == b'\n')
            .filter(|l| !l.iter().all(|b| b.is_ascii_whitespace()))
            .count())
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sync strategy applied after each append
    pub fn sync_strategy(&self) -> SyncStrategy {
        self.sync_strategy
    }
}
