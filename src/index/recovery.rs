//! Log replay
//!
//! Rebuilds the in-memory map from the log on startup.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::RecoveryMode;
use crate::error::{KvError, Result};
use crate::wal::LogStore;
use crate::record::{DecodedFields, Operation, FIELD_KEY, FIELD_OPERATION, FIELD_VALUE};

/// Result of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecoveryResult {
    /// INSERT/UPDATE records applied to the map
    pub records_applied: u64,

    /// Records with an operation other than INSERT/UPDATE
    pub records_ignored: u64,

    /// Undecodable lines skipped (only in `SkipMalformed` mode)
    pub lines_skipped: u64,

    /// Distinct keys in the map after replay
    pub keys_recovered: u64,
}

/// Replay every record of `store` into a fresh map
///
/// Replay trusts the log: INSERT and UPDATE both set the key
/// unconditionally, in log order.
pub(crate) fn replay(
    store: &LogStore,
    mode: RecoveryMode,
) -> Result<(HashMap<String, String>, RecoveryResult)> {
    let mut map = HashMap::new();
    let mut result = RecoveryResult::default();

    for entry in store.entries()? {
        let line = match entry {
            Ok(line) => line,
            Err(e @ KvError::MalformedRecord { .. }) if mode == RecoveryMode::SkipMalformed => {
                tracing::warn!(error = %e, "Skipping malformed log line");
                result.lines_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        match apply(&mut map, &line.fields) {
            Ok(true) => result.records_applied += 1,
            Ok(false) => result.records_ignored += 1,
            Err(e) if mode == RecoveryMode::SkipMalformed => {
                let e = e.at_line(line.line_no);
                tracing::warn!(error = %e, "Skipping malformed log line");
                result.lines_skipped += 1;
            }
            Err(e) => return Err(e.at_line(line.line_no)),
        }
    }

    result.keys_recovered = map.len() as u64;
    Ok((map, result))
}

/// Apply one decoded record; returns false if its operation is ignored
fn apply(map: &mut HashMap<String, String>, fields: &DecodedFields) -> Result<bool> {
    let operation = fields
        .get(FIELD_OPERATION)
        .ok_or_else(|| KvError::malformed(format!("missing field `{}`", FIELD_OPERATION)))?;

    match operation.parse::<Operation>() {
        Ok(Operation::Insert) | Ok(Operation::Update) => {}
        Err(_) => {
            tracing::warn!(operation = %operation, "Ignoring record with unknown operation");
            return Ok(false);
        }
    }

    let field = |name: &str| {
        fields
            .get(name)
            .cloned()
            .ok_or_else(|| KvError::malformed(format!("missing field `{}`", name)))
    };

    map.insert(field(FIELD_KEY)?, field(FIELD_VALUE)?);
    Ok(true)
}
