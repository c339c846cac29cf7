//! Log record definitions
//!
//! Defines the structure of individual log records.

use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};

use crate::error::{KvError, Result};
use super::{DecodedFields, FieldValue, Fields};

pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_OPERATION: &str = "operation";
pub const FIELD_KEY: &str = "key";
pub const FIELD_VALUE: &str = "value";

/// Mutations that can be logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Add a key that was absent
    Insert,

    /// Overwrite a key that was present
    Update,
}

impl Operation {
    /// Name written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INSERT" => Ok(Operation::Insert),
            "UPDATE" => Ok(Operation::Update),
            other => Err(KvError::malformed(format!("unknown operation {:?}", other))),
        }
    }
}

/// A single durable mutation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// RFC 3339 UTC time the record was created
    pub timestamp: String,

    pub operation: Operation,

    pub key: String,

    pub value: String,
}

impl LogRecord {
    /// Create a record stamped with the current time
    pub fn new(operation: Operation, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            operation,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Field mapping handed to the codec
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(FIELD_TIMESTAMP.to_string(), FieldValue::from(self.timestamp.as_str()));
        fields.insert(FIELD_OPERATION.to_string(), FieldValue::from(self.operation.as_str()));
        fields.insert(FIELD_KEY.to_string(), FieldValue::from(self.key.as_str()));
        fields.insert(FIELD_VALUE.to_string(), FieldValue::from(self.value.as_str()));
        fields
    }

    /// Rebuild a record from decoded fields
    ///
    /// Requires all four fields and a known operation.
    pub fn from_fields(fields: &DecodedFields) -> Result<Self> {
        let get = |name: &str| {
            fields
                .get(name)
                .cloned()
                .ok_or_else(|| KvError::malformed(format!("missing field `{}`", name)))
        };

        Ok(Self {
            timestamp: get(FIELD_TIMESTAMP)?,
            operation: get(FIELD_OPERATION)?.parse()?,
            key: get(FIELD_KEY)?,
            value: get(FIELD_VALUE)?,
        })
    }
}
