// crates/optionset-core/src/config.rs
// ============================================================================
// Module: Provider Configuration
// Description: Immutable provider configuration and per-fetch value types.
// Purpose: Describe the two provider strategies and their inputs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Provider configuration is a discriminated union owned by the enclosing
//! field definition: a remote endpoint with optional stored-credential
//! reference, or a script with a sandbox flag and an ordered classpath.
//! Invariants:
//! - Configuration is immutable once constructed.
//! - Credentials are resolved on demand per fetch and never persisted here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Variable Map
// ============================================================================

/// Mapping from variable name to value, supplied per evaluation.
///
/// Keys are unique; insertion order is irrelevant. Read-only to the core.
pub type VariableMap = BTreeMap<String, String>;

// ============================================================================
// SECTION: Provider Configuration
// ============================================================================

/// Configuration for the remote (HTTP) provider strategy.
///
/// # Invariants
/// - `url` may contain `${name}` references resolved at fetch time.
/// - An empty or unset `credential_id` means unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Endpoint URL template fetched on each invocation.
    pub url: String,
    /// Identifier of the stored credential used for Basic auth, if any.
    #[serde(default)]
    pub credential_id: Option<String>,
}

/// Configuration for the script provider strategy.
///
/// # Invariants
/// - `classpath` ordering is load order; duplicates are permitted but
///   discouraged (later entries override earlier ones of the same name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Script source evaluated on each invocation.
    pub source: String,
    /// Whether sandbox policy enforcement is enabled for this script.
    #[serde(default)]
    pub sandboxed: bool,
    /// Additional code sources made available to the script.
    #[serde(default)]
    pub classpath: Vec<ClasspathEntry>,
}

/// Discriminated provider configuration, one variant per strategy.
///
/// # Invariants
/// - Immutable once constructed; lifetime equals the enclosing field
///   definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Fetch and return raw data from a remote HTTP endpoint.
    Remote(RemoteConfig),
    /// Evaluate a user-supplied script in a sandboxed engine.
    Script(ScriptConfig),
}

// ============================================================================
// SECTION: Classpath Entries
// ============================================================================

/// An additional code source permitted inside the script sandbox.
///
/// # Invariants
/// - `url` points at a plain-text library source fetched at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClasspathEntry {
    /// Location of the library source.
    pub url: String,
}

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Username and secret resolved from the host credential store.
///
/// # Invariants
/// - Exists only for the duration of one fetch; never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Account username.
    pub username: String,
    /// Account secret.
    pub secret: String,
}
