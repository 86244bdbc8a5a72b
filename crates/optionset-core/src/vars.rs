// crates/optionset-core/src/vars.rs
// ============================================================================
// Module: Variable Resolver
// Description: Substitution of `${name}` references into template strings.
// Purpose: Resolve endpoint URLs and script bindings against a variable map.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Pure substitution of variable references into templates. Unknown
//! references are left verbatim by policy: resolution never errors, and a
//! fully-resolved string passes through unchanged.
//! Invariants:
//! - Each known reference is replaced exactly once, left to right.
//! - Unknown, empty, and unclosed references are preserved verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::VariableMap;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Replaces every `${name}` reference in `template` with its mapped value.
///
/// Unknown references are left verbatim; so are `${}` and an unclosed `${`.
/// Replaced values are not re-scanned, which makes resolution idempotent on
/// already-resolved input.
#[must_use]
pub fn resolve_variables(template: &str, variables: &VariableMap) -> String {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        resolved.push_str(&rest[..start]);
        let reference = &rest[start + 2..];
        let Some(end) = reference.find('}') else {
            // Unclosed reference: keep the tail verbatim.
            resolved.push_str(&rest[start..]);
            return resolved;
        };
        let name = &reference[..end];
        match variables.get(name) {
            Some(value) if !name.is_empty() => resolved.push_str(value),
            _ => {
                resolved.push_str(&rest[start..start + 2 + end + 1]);
            }
        }
        rest = &reference[end + 1..];
    }
    resolved.push_str(rest);
    resolved
}

// ============================================================================
// SECTION: Tests
// ============================================================================
