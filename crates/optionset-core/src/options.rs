// crates/optionset-core/src/options.rs
// ============================================================================
// Module: Canonical Option Model
// Description: Canonical option entries and evaluation result shapes.
// Purpose: Define the single output shape all providers ultimately produce.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every provider strategy funnels its output into [`CanonicalResult`], an
//! ordered sequence of [`OptionEntry`] values. The script strategy first
//! surfaces a raw [`EvaluationResult`], a tagged union classified at the
//! engine boundary and consumed immediately by the normalizer.
//! Invariants:
//! - [`CanonicalResult`] is never null; "no data" is the empty sequence.
//! - Entry order is preserved end to end; nothing is deduplicated or dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Option Entries
// ============================================================================

/// A single selectable value offered to the form field.
///
/// Wire form (the only shape callers ever observe): a bare JSON string for
/// [`OptionEntry::Plain`], or a `{"value": ..., "label": ...}` object for
/// [`OptionEntry::Labeled`].
///
/// # Invariants
/// - `value` and `label` are plain strings; no nested structure survives
///   normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionEntry {
    /// An entry whose display label differs from its submitted value.
    Labeled {
        /// Value submitted when the entry is selected.
        value: String,
        /// Label rendered to the user.
        label: String,
    },
    /// A plain string entry; value and label coincide.
    Plain(String),
}

impl OptionEntry {
    /// Returns the value submitted when this entry is selected.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Labeled {
                value, ..
            } => value,
            Self::Plain(value) => value,
        }
    }

    /// Returns the label rendered to the user.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Labeled {
                label, ..
            } => label,
            Self::Plain(value) => value,
        }
    }
}

/// Ordered sequence of canonical entries; the only shape returned to callers.
pub type CanonicalResult = Vec<OptionEntry>;

// ============================================================================
// SECTION: Evaluation Results
// ============================================================================

/// Raw output of one script evaluation, classified at the engine boundary.
///
/// # Invariants
/// - Consumed exactly once by [`crate::normalize::normalize`].
/// - `Other` carries the engine's type name for the unsupported-shape error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    /// The script produced no value.
    Absent,
    /// The script produced a scalar string (expected to be a JSON array).
    Scalar(String),
    /// The script produced an already-canonical ordered collection.
    Collection(CanonicalResult),
    /// The script produced a shape the normalizer does not support.
    Other {
        /// Engine-reported type name of the unsupported value.
        type_name: String,
    },
}
