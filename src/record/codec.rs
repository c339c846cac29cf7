//! Record codec
//!
//! Converts a flat field mapping to a single text line and back.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{KvError, Result};

/// Field mapping accepted by [`encode`]
pub type Fields = BTreeMap<String, FieldValue>;

/// Field mapping produced by [`decode`]; every value comes back as a string
pub type DecodedFields = BTreeMap<String, String>;

/// A single field value: a string or a primitive
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<FieldValue> for Value {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Str(s) => Value::String(s),
            FieldValue::Int(n) => Value::from(n),
            // Non-finite floats have no JSON form
            FieldValue::Float(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Null => Value::Null,
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a field mapping into one line (no trailing newline)
///
/// Strings are quoted, primitives are not. Quotes, backslashes and control
/// characters inside strings are escaped, so the output never spans lines.
pub fn encode(fields: &Fields) -> String {
    let object: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), Value::from(value.clone())))
        .collect();

    Value::Object(object).to_string()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one encoded line back into a field mapping
///
/// Fails with `MalformedRecord` if the line is not a single flat object.
pub fn decode(line: &str) -> Result<DecodedFields> {
    let value: Value = serde_json::from_str(line.trim())
        .map_err(|e| KvError::malformed(format!("invalid encoding: {}", e)))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(KvError::malformed(format!(
                "expected an object, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut fields = DecodedFields::new();
    for (name, value) in object {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            nested => {
                return Err(KvError::malformed(format!(
                    "field {:?} holds a nested {}",
                    name,
                    json_kind(&nested)
                )))
            }
        };
        fields.insert(name, text);
    }

    Ok(fields)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_strings_quoted_primitives_not() {
        let line = encode(&fields(&[
            ("name", FieldValue::from("x")),
            ("count", FieldValue::Int(3)),
            ("ok", FieldValue::Bool(true)),
        ]));

        assert_eq!(line, r#"{"count":3,"name":"x","ok":true}"#);
    }

    #[test]
    fn test_non_finite_float_encodes_as_null() {
        let line = encode(&fields(&[("f", FieldValue::Float(f64::NAN))]));
        assert_eq!(line, r#"{"f":null}"#);
    }

    #[test]
    fn test_decode_rejects_nested_values() {
        let err = decode(r#"{"key":["a"]}"#).unwrap_err();
        assert!(matches!(err, KvError::MalformedRecord { .. }));
    }
}
