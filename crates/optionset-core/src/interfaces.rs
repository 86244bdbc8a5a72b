// crates/optionset-core/src/interfaces.rs
// ============================================================================
// Module: Collaborator Interfaces
// Description: Backend-agnostic interfaces for credentials, variables, and providers.
// Purpose: Define the contract surfaces the host wires into provider strategies.
// Dependencies: crate::config, crate::error, crate::options
// ============================================================================

//! ## Overview
//! Interfaces define how option providers integrate with the host without
//! embedding backend-specific details. Implementations must be deterministic
//! with respect to the supplied context and fail closed on invalid data.
//! Invariants:
//! - Each `produce`/`filter` invocation runs synchronously on the caller's
//!   thread; providers hold no shared mutable state between invocations.
//! - `filter` defaults to an explicit not-supported error, never a silent
//!   no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::config::Credential;
use crate::config::VariableMap;
use crate::error::CredentialError;
use crate::error::ProviderError;
use crate::options::CanonicalResult;

// ============================================================================
// SECTION: Credential Store
// ============================================================================

/// A stored credential together with its host-assigned identifier.
///
/// # Invariants
/// - `id` is unique within the credentials visible for one scope URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    /// Host-assigned credential identifier.
    pub id: String,
    /// The username/secret pair.
    pub credential: Credential,
}

/// Host credential store, queried with system-level trust.
///
/// The core filters the returned entries by configured identifier; the store
/// is responsible for URI scoping.
pub trait CredentialStore: Send + Sync {
    /// Returns all credentials whose scope matches the given URI.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] when the store cannot answer the lookup.
    fn lookup(&self, scope_uri: &str) -> Result<Vec<StoredCredential>, CredentialError>;
}

// ============================================================================
// SECTION: Variable Source
// ============================================================================

/// Host global-variable collaborator, read fresh on each invocation.
pub trait VariableSource: Send + Sync {
    /// Returns the current variable snapshot. Never cached by the core.
    fn current_variables(&self) -> VariableMap;
}

// ============================================================================
// SECTION: Provider Interface
// ============================================================================

/// Per-invocation context passed explicitly into every provider call.
///
/// # Invariants
/// - `variables` is a snapshot; providers must not mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderContext {
    /// Variable snapshot used for substitution and script bindings.
    pub variables: VariableMap,
}

impl ProviderContext {
    /// Creates a context around a variable snapshot.
    #[must_use]
    pub const fn new(variables: VariableMap) -> Self {
        Self {
            variables,
        }
    }

    /// Creates a context from a variable source, reading a fresh snapshot.
    #[must_use]
    pub fn from_source(source: &dyn VariableSource) -> Self {
        Self::new(source.current_variables())
    }
}

/// Data produced by one provider invocation.
///
/// The remote strategy returns the raw response text (narrowing happens
/// client-side); the script strategy returns the canonical sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderData {
    /// Raw response body from a remote endpoint.
    Raw(String),
    /// Canonical normalized option entries.
    Options(CanonicalResult),
}

/// A configured strategy that produces selectable values for a form field.
///
/// # Invariants
/// - Any collaborator failure surfaces as a single [`ProviderError`] wrapping
///   the cause; providers add no retry logic.
/// - `filter` support is optional; the default body reports the capability as
///   not supported.
pub trait OptionsProvider: Send + Sync {
    /// Returns the short variant name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Produces the provider's data for the given context.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] wrapping the first collaborator failure.
    fn produce(&self, ctx: &ProviderContext) -> Result<ProviderData, ProviderError>;

    /// Narrows the provider's data by a query string, where supported.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotSupported`] unless a variant overrides
    /// this with real narrowing semantics.
    fn filter(&self, _query: &str, _ctx: &ProviderContext) -> Result<ProviderData, ProviderError> {
        Err(ProviderError::NotSupported {
            operation: "filter".to_string(),
            provider: self.name().to_string(),
        })
    }
}
