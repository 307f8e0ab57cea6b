//! Feature vector construction
//!
//! Turns a validated JSON record into the fixed-order `Vec<f64>` the scaler
//! and classifier were fitted on. Coercion is strict about finiteness but
//! deliberately performs no domain-range validation: a negative Age passes
//! through verbatim, matching the service's permissive contract.

use serde_json::{Map, Value};

use crate::error::{PrediksiError, Result};
use crate::schema::{FEATURE_COUNT, FEATURE_NAMES};

/// Coerce a raw JSON value to a finite f64.
///
/// Accepts numbers, numeric strings (trimmed), and booleans (as 0/1).
/// Everything else — null, arrays, objects, non-numeric strings, and any
/// non-finite result — is a client-input error naming the field and value.
pub fn coerce_field(field: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(PrediksiError::InvalidFieldValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Build the 32-element feature vector from a record, in schema order.
///
/// The record must already have passed the presence check
/// ([`crate::schema::missing_fields`]); an absent field here is reported as
/// an invalid value rather than panicking.
pub fn build_vector(record: &Map<String, Value>) -> Result<Vec<f64>> {
    let mut row = Vec::with_capacity(FEATURE_COUNT);
    for name in FEATURE_NAMES {
        row.push(coerce_field(name, record.get(name).unwrap_or(&Value::Null))?);
    }
    Ok(row)
}

/// Batch form of [`build_vector`], preserving input order
pub fn build_batch(records: &[Map<String, Value>]) -> Result<Vec<Vec<f64>>> {
    records.iter().map(build_vector).collect()
}
