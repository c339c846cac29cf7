//! Record Module
//!
//! Log record definitions and the line codec that persists them.
//!
//! ## Line Format
//! One record per line, encoded as a flat JSON object:
//! ```text
//! {"key":"a","operation":"INSERT","timestamp":"2024-05-01T10:00:00.000000Z","value":"1"}
//! ```
//!
//! String values are quoted and escaped, so values may contain commas,
//! colons, quotes, braces or newlines without breaking the line.

mod codec;
mod entry;

pub use codec::{decode, encode, DecodedFields, FieldValue, Fields};
pub use entry::{LogRecord, Operation, FIELD_KEY, FIELD_OPERATION, FIELD_TIMESTAMP, FIELD_VALUE};
