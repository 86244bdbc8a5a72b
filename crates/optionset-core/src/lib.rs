// crates/optionset-core/src/lib.rs
// ============================================================================
// Module: Optionset Core
// Description: Data model, error taxonomy, and collaborator interfaces.
// Purpose: Define the provider contract surfaces shared by all strategies.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate defines the canonical data model for dynamic option lists, the
//! error taxonomy surfaced at provider boundaries, and the backend-agnostic
//! collaborator interfaces (credential store, variable source, provider).
//! Invariants:
//! - A provider invocation never returns a null result: absent evaluation
//!   output normalizes to an empty sequence.
//! - Variables are passed explicitly into every resolver call; the core never
//!   reads ambient process state.
//!
//! Security posture: templates, scripts, and remote responses are untrusted
//! inputs; normalization and resolution fail closed on unsupported shapes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod interfaces;
pub mod normalize;
pub mod options;
pub mod vars;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ClasspathEntry;
pub use config::Credential;
pub use config::ProviderConfig;
pub use config::RemoteConfig;
pub use config::ScriptConfig;
pub use config::VariableMap;
pub use error::CredentialError;
pub use error::EvaluationError;
pub use error::FetchError;
pub use error::NormalizeError;
pub use error::ProviderError;
pub use error::TimeoutError;
pub use interfaces::CredentialStore;
pub use interfaces::OptionsProvider;
pub use interfaces::ProviderContext;
pub use interfaces::ProviderData;
pub use interfaces::StoredCredential;
pub use interfaces::VariableSource;
pub use normalize::normalize;
pub use options::CanonicalResult;
pub use options::EvaluationResult;
pub use options::OptionEntry;
pub use vars::resolve_variables;
