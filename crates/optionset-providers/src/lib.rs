// crates/optionset-providers/src/lib.rs
// ============================================================================
// Module: Optionset Providers
// Description: Remote and script provider strategies with sandboxed evaluation.
// Purpose: Implement the optionset-core provider contract end to end.
// Dependencies: optionset-core, reqwest, base64, rhai, serde_json, tracing
// ============================================================================

//! ## Overview
//! This crate ships the two provider strategies: a remote HTTP fetcher with
//! optional Basic-auth credentials, and a sandboxed, time-boundable script
//! evaluator whose output is normalized into the canonical sequence.
//! Invariants:
//! - Every collaborator failure is logged with its full cause chain and
//!   surfaced as a single [`optionset_core::ProviderError`].
//! - Nothing is retried automatically; each invocation is independent and
//!   stateless.
//!
//! Security posture: endpoint responses and script sources are untrusted;
//! sandbox enforcement is in-process and best-effort by design.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod credentials;
pub mod remote;
pub mod script;
pub mod timeout;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use credentials::resolve_credential;
pub use remote::RemoteFetcher;
pub use remote::RemoteFetcherConfig;
pub use remote::RemoteProvider;
pub use script::ScriptEvaluator;
pub use script::ScriptProvider;
pub use script::VALIDATION_TIMEOUT;
pub use script::policy::SandboxPolicy;
pub use script::test_script;
pub use timeout::run_with_timeout;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error;
use std::sync::Arc;

use optionset_core::CredentialStore;
use optionset_core::OptionsProvider;
use optionset_core::ProviderConfig;
use optionset_core::ProviderError;

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Instantiates the provider strategy described by a configuration.
///
/// The credential store is only consulted by the remote strategy; the script
/// strategy receives a fetcher built from the same configuration for its
/// classpath loading and in-script HTTP helper.
///
/// # Errors
///
/// Returns [`ProviderError`] when the HTTP client cannot be constructed.
pub fn provider_from_config(
    config: ProviderConfig,
    store: Arc<dyn CredentialStore>,
    fetcher_config: RemoteFetcherConfig,
) -> Result<Box<dyn OptionsProvider>, ProviderError> {
    match config {
        ProviderConfig::Remote(remote) => {
            Ok(Box::new(RemoteProvider::new(remote, store, fetcher_config)?))
        }
        ProviderConfig::Script(script) => {
            Ok(Box::new(ScriptProvider::new(script, fetcher_config, SandboxPolicy::default())?))
        }
    }
}

// ============================================================================
// SECTION: Logging Helpers
// ============================================================================

/// Renders an error with its full cause chain for boundary logging.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
