// crates/optionset-providers/src/credentials.rs
// ============================================================================
// Module: Credential Resolution
// Description: Lookup of stored credentials by identifier and URI scope.
// Purpose: Select the credential a remote fetch should authenticate with.
// Dependencies: optionset-core
// ============================================================================

//! ## Overview
//! Credential resolution is a read-only lookup against the host credential
//! store: all credentials scoped to the target URI are fetched, then the
//! first entry with the configured identifier is selected.
//! Invariants:
//! - An empty or unset identifier means "unauthenticated", not an error.
//! - No match is likewise not an error; the fetch proceeds without auth.

// ============================================================================
// SECTION: Imports
// ============================================================================

use optionset_core::Credential;
use optionset_core::CredentialError;
use optionset_core::CredentialStore;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the credential to use for a target URI, if any.
///
/// # Errors
///
/// Returns [`CredentialError`] only when the store itself fails; a missing
/// identifier or no matching entry yields `Ok(None)`.
pub fn resolve_credential(
    store: &dyn CredentialStore,
    uri: &str,
    credential_id: Option<&str>,
) -> Result<Option<Credential>, CredentialError> {
    let Some(id) = credential_id else {
        return Ok(None);
    };
    if id.is_empty() {
        return Ok(None);
    }
    let entries = store.lookup(uri)?;
    Ok(entries.into_iter().find(|entry| entry.id == id).map(|entry| entry.credential))
}
