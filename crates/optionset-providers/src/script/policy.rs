// crates/optionset-providers/src/script/policy.rs
// ============================================================================
// Module: Sandbox Policy
// Description: Hardening rules applied to a script engine when sandboxing is on.
// Purpose: Keep the rule set outside the evaluator, which only toggles it.
// Dependencies: rhai
// ============================================================================

//! ## Overview
//! The sandbox policy is the boundary object holding the restriction rule
//! set: operation and recursion ceilings, value size caps, and denied
//! language symbols. The evaluator applies a policy verbatim when a script is
//! marked sandboxed and never defines rules of its own.
//! Invariants:
//! - Enforcement is in-process and best-effort; a runaway script is stopped
//!   at the next engine checkpoint, not preemptively.
//! - Policy state is immutable once constructed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rhai::Engine;

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Restriction rule set applied to sandboxed script evaluation.
///
/// # Invariants
/// - All ceilings are hard limits; exceeding one aborts the evaluation.
/// - `denied_symbols` entries are removed from the language surface entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxPolicy {
    /// Maximum abstract operations before the evaluation is aborted.
    pub max_operations: u64,
    /// Maximum nested function call levels.
    pub max_call_levels: usize,
    /// Maximum expression nesting depth.
    pub max_expr_depth: usize,
    /// Maximum string size in bytes.
    pub max_string_size: usize,
    /// Maximum array length.
    pub max_array_size: usize,
    /// Maximum object map size.
    pub max_map_size: usize,
    /// Language symbols removed from sandboxed scripts.
    pub denied_symbols: Vec<String>,
}

impl SandboxPolicy {
    /// Applies the rule set to an engine.
    pub fn apply(&self, engine: &mut Engine) {
        engine.set_max_operations(self.max_operations);
        engine.set_max_call_levels(self.max_call_levels);
        engine.set_max_expr_depths(self.max_expr_depth, self.max_expr_depth);
        engine.set_max_string_size(self.max_string_size);
        engine.set_max_array_size(self.max_array_size);
        engine.set_max_map_size(self.max_map_size);
        for symbol in &self.denied_symbols {
            engine.disable_symbol(symbol);
        }
    }
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            max_operations: 1_000_000,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_string_size: 1024 * 1024,
            max_array_size: 10_000,
            max_map_size: 10_000,
            denied_symbols: vec!["eval".to_string()],
        }
    }
}
