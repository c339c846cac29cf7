//! Error types for logkv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for logkv operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Key {0:?} already exists")]
    DuplicateKey(String),

    #[error("Key {0:?} does not exist")]
    KeyNotFound(String),

    #[error("Key must not be empty")]
    EmptyKey,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    #[error("Malformed log record{}: {reason}", line_suffix(.line))]
    MalformedRecord {
        /// 1-based line number in the log, when known
        line: Option<usize>,
        reason: String,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(n) => format!(" at line {}", n),
        None => String::new(),
    }
}

impl KvError {
    /// Build a `MalformedRecord` error that is not tied to a line yet
    pub fn malformed(reason: impl Into<String>) -> Self {
        KvError::MalformedRecord {
            line: None,
            reason: reason.into(),
        }
    }

    /// Attach a line number to a `MalformedRecord` error; other kinds pass through
    pub fn at_line(self, line_no: usize) -> Self {
        match self {
            KvError::MalformedRecord { reason, .. } => KvError::MalformedRecord {
                line: Some(line_no),
                reason,
            },
            other => other,
        }
    }

    /// True for caller-facing validation failures (nothing was written)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            KvError::DuplicateKey(_) | KvError::KeyNotFound(_) | KvError::EmptyKey
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_with_line() {
        let err = KvError::malformed("missing field `key`").at_line(3);
        assert_eq!(
            err.to_string(),
            "Malformed log record at line 3: missing field `key`"
        );
    }

    #[test]
    fn test_malformed_display_without_line() {
        let err = KvError::malformed("not an object");
        assert_eq!(err.to_string(), "Malformed log record: not an object");
    }

    #[test]
    fn test_validation_kinds() {
        assert!(KvError::DuplicateKey("a".into()).is_validation());
        assert!(KvError::KeyNotFound("a".into()).is_validation());
        assert!(KvError::EmptyKey.is_validation());
        assert!(!KvError::malformed("x").is_validation());
    }
}
