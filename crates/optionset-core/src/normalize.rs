// crates/optionset-core/src/normalize.rs
// ============================================================================
// Module: Result Normalizer
// Description: Conversion of raw evaluation results into canonical entries.
// Purpose: Guarantee one output shape for every provider output.
// Dependencies: crate::error, crate::options, serde_json
// ============================================================================

//! ## Overview
//! The normalizer converts a raw [`EvaluationResult`] into the canonical
//! ordered sequence. Absent input becomes the empty sequence, collections
//! pass through unchanged, and scalar strings are parsed as JSON arrays.
//! Invariants:
//! - Total over the three defined input shapes; never drops an entry.
//! - Empty output only ever means "legitimately empty", never a swallowed
//!   failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::error::NormalizeError;
use crate::options::CanonicalResult;
use crate::options::EvaluationResult;
use crate::options::OptionEntry;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Converts a raw evaluation result into the canonical ordered sequence.
///
/// # Errors
///
/// Returns [`NormalizeError`] when a scalar result is not a JSON array or the
/// evaluation produced an unsupported shape.
pub fn normalize(result: EvaluationResult) -> Result<CanonicalResult, NormalizeError> {
    match result {
        EvaluationResult::Absent => Ok(Vec::new()),
        EvaluationResult::Collection(entries) => Ok(entries),
        EvaluationResult::Scalar(text) => entries_from_json_text(&text),
        EvaluationResult::Other {
            type_name,
        } => Err(NormalizeError::UnsupportedShape {
            type_name,
        }),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a scalar result as a JSON array and maps it element-wise.
fn entries_from_json_text(text: &str) -> Result<CanonicalResult, NormalizeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| NormalizeError::NotAJsonArray {
            detail: err.to_string(),
        })?;
    let Value::Array(items) = value else {
        return Err(NormalizeError::NotAJsonArray {
            detail: format!("expected array, got {}", json_type_name(&value)),
        });
    };
    Ok(items.into_iter().map(entry_from_json).collect())
}

/// Maps one JSON array element onto a canonical entry.
///
/// Strings stay plain; objects with string `value`/`label` fields are
/// preserved as pairs, with the label defaulting to the value when absent;
/// everything else is coerced to its compact string form.
fn entry_from_json(item: Value) -> OptionEntry {
    match item {
        Value::String(text) => OptionEntry::Plain(text),
        Value::Object(map) => {
            let value = map.get("value").and_then(Value::as_str);
            let label = map.get("label").and_then(Value::as_str);
            match (value, label) {
                (Some(value), Some(label)) => OptionEntry::Labeled {
                    value: value.to_string(),
                    label: label.to_string(),
                },
                (Some(value), None) => OptionEntry::Labeled {
                    value: value.to_string(),
                    label: value.to_string(),
                },
                _ => OptionEntry::Plain(Value::Object(map).to_string()),
            }
        }
        other => OptionEntry::Plain(other.to_string()),
    }
}

/// Names a JSON value's type for diagnostics.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
