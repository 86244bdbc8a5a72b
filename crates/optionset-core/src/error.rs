// crates/optionset-core/src/error.rs
// ============================================================================
// Module: Error Taxonomy
// Description: Failure types surfaced by providers and their collaborators.
// Purpose: Keep lower-level failures distinguishable behind one boundary wrapper.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every collaborator failure is caught at the provider boundary and re-raised
//! as a single [`ProviderError`] wrapping the cause. Nothing is retried
//! automatically; empty-but-valid output is never produced as an error
//! substitute.
//! Invariants:
//! - Variants are stable for programmatic handling.
//! - Timeouts are distinct from evaluation failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use thiserror::Error;

// ============================================================================
// SECTION: Collaborator Errors
// ============================================================================

/// Remote fetch errors (network, protocol, or decode failure).
///
/// # Invariants
/// - A single failed attempt fails the whole operation; retries are the
///   caller's responsibility.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The resolved endpoint URL did not parse.
    #[error("invalid endpoint url: {detail}")]
    InvalidUrl {
        /// Parser diagnostic.
        detail: String,
    },
    /// The request could not be sent or the connection failed mid-flight.
    #[error("http request failed: {detail}")]
    Transport {
        /// Transport diagnostic.
        detail: String,
    },
    /// The endpoint answered with a non-success status code.
    #[error("http status {status} from endpoint")]
    Status {
        /// HTTP status code received.
        status: u16,
    },
    /// The response body could not be read or was not valid UTF-8.
    #[error("response body unreadable: {detail}")]
    Body {
        /// Read or decode diagnostic.
        detail: String,
    },
    /// The response body exceeded the configured size ceiling.
    #[error("response exceeds {max_bytes} byte limit")]
    TooLarge {
        /// Configured ceiling in bytes.
        max_bytes: usize,
    },
}

/// Credential store lookup errors.
///
/// A missing credential is not an error; this covers store failures only.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The host credential store failed to answer the lookup.
    #[error("credential store lookup failed: {detail}")]
    Lookup {
        /// Store diagnostic.
        detail: String,
    },
}

/// Script evaluation errors (the script raised or failed to run).
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A classpath library could not be fetched or compiled.
    #[error("classpath library {url} failed to load: {detail}")]
    Library {
        /// Library location.
        url: String,
        /// Fetch or compile diagnostic.
        detail: String,
    },
    /// The script failed to parse or raised at runtime.
    #[error("script raised an error: {detail}")]
    Script {
        /// Engine diagnostic, including position information.
        detail: String,
    },
}

/// Deadline errors from the time-bounded validation path.
#[derive(Debug, Error)]
pub enum TimeoutError {
    /// The evaluation did not complete within the enforced deadline.
    ///
    /// The worker is abandoned, not stopped: side effects of the timed-out
    /// evaluation may still land after this error is returned.
    #[error("evaluation exceeded the {limit:?} deadline")]
    Expired {
        /// Enforced wall-clock limit.
        limit: Duration,
    },
    /// The evaluation worker terminated without producing a result.
    #[error("evaluation worker terminated without a result")]
    Worker,
}

/// Normalization errors for unsupported evaluation result shapes.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A scalar result did not parse as a JSON array.
    #[error("result is not a json array: {detail}")]
    NotAJsonArray {
        /// Parse diagnostic or observed JSON type.
        detail: String,
    },
    /// The evaluation produced a shape outside the defined union.
    #[error("unsupported result type: {type_name}")]
    UnsupportedShape {
        /// Engine-reported type name.
        type_name: String,
    },
    /// The canonical result failed to serialize to its wire form.
    #[error("canonical result serialization failed: {detail}")]
    Serialize {
        /// Serializer diagnostic.
        detail: String,
    },
}

// ============================================================================
// SECTION: Boundary Wrapper
// ============================================================================

/// Single error surfaced to callers of any provider operation.
///
/// # Invariants
/// - Wraps exactly one lower-level cause, preserved as the error source.
/// - `NotSupported` marks a capability a provider variant does not implement,
///   never a silent no-op.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Remote fetch failed.
    #[error("fetch failed")]
    Fetch(#[from] FetchError),
    /// Credential resolution failed.
    #[error("credential resolution failed")]
    Credential(#[from] CredentialError),
    /// Script evaluation failed.
    #[error("script evaluation failed")]
    Evaluation(#[from] EvaluationError),
    /// Evaluation exceeded the validation deadline.
    #[error("evaluation timed out")]
    Timeout(#[from] TimeoutError),
    /// Evaluation result could not be normalized.
    #[error("result normalization failed")]
    Normalize(#[from] NormalizeError),
    /// The invoked capability is not implemented by this provider variant.
    #[error("{operation} not supported by {provider} provider")]
    NotSupported {
        /// Name of the unsupported operation.
        operation: String,
        /// Name of the provider variant.
        provider: String,
    },
}
