// crates/optionset-providers/src/script/mod.rs
// ============================================================================
// Module: Script Option Provider
// Description: Script provider strategy and the interactive validation entry.
// Purpose: Evaluate configured scripts and normalize their output.
// Dependencies: optionset-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! The script strategy evaluates a configured source inside the sandboxed
//! evaluator and normalizes the raw result into the canonical sequence. The
//! interactive validation entry runs the same pipeline under a hard two
//! minute deadline so a misbehaving script cannot hang the caller's session;
//! the production `produce` path deliberately carries no deadline.
//! Invariants:
//! - `filter` always fails with an explicit not-supported error; no narrowing
//!   semantics are defined for script output.
//! - Failures are logged with their full cause chain at the provider
//!   boundary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod evaluator;
pub mod policy;

pub use evaluator::HttpHelper;
pub use evaluator::ScriptEvaluator;
pub use policy::SandboxPolicy;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use optionset_core::CanonicalResult;
use optionset_core::ClasspathEntry;
use optionset_core::NormalizeError;
use optionset_core::OptionsProvider;
use optionset_core::ProviderContext;
use optionset_core::ProviderData;
use optionset_core::ProviderError;
use optionset_core::ScriptConfig;
use optionset_core::VariableMap;
use optionset_core::normalize;
use optionset_core::resolve_variables;

use crate::error_chain;
use crate::remote::RemoteFetcher;
use crate::remote::RemoteFetcherConfig;
use crate::timeout::run_with_timeout;

// ============================================================================
// SECTION: Script Provider
// ============================================================================

/// Provider strategy evaluating a user-supplied script per invocation.
pub struct ScriptProvider {
    /// Immutable provider configuration.
    config: ScriptConfig,
    /// Sandboxed evaluator shared by production and validation paths.
    evaluator: ScriptEvaluator,
}

impl ScriptProvider {
    /// Creates a script provider around a configuration and sandbox policy.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the backing HTTP client cannot be
    /// created.
    pub fn new(
        config: ScriptConfig,
        fetcher_config: RemoteFetcherConfig,
        policy: SandboxPolicy,
    ) -> Result<Self, ProviderError> {
        let fetcher = RemoteFetcher::new(fetcher_config).map_err(ProviderError::Fetch)?;
        Ok(Self {
            config,
            evaluator: ScriptEvaluator::new(fetcher, policy),
        })
    }

    /// Evaluates the configured script and normalizes its output.
    fn produce_inner(&self, ctx: &ProviderContext) -> Result<CanonicalResult, ProviderError> {
        let bindings = resolved_bindings(&ctx.variables);
        let result = self.evaluator.evaluate(
            &self.config.source,
            self.config.sandboxed,
            &self.config.classpath,
            &bindings,
        )?;
        Ok(normalize(result)?)
    }
}

impl OptionsProvider for ScriptProvider {
    fn name(&self) -> &'static str {
        "script"
    }

    fn produce(&self, ctx: &ProviderContext) -> Result<ProviderData, ProviderError> {
        match self.produce_inner(ctx) {
            Ok(options) => Ok(ProviderData::Options(options)),
            Err(err) => {
                tracing::error!(provider = self.name(), error = %error_chain(&err), "script evaluation failed");
                Err(err)
            }
        }
    }

    fn filter(&self, _query: &str, _ctx: &ProviderContext) -> Result<ProviderData, ProviderError> {
        Err(ProviderError::NotSupported {
            operation: "filter".to_string(),
            provider: self.name().to_string(),
        })
    }
}

// ============================================================================
// SECTION: Validation Entry
// ============================================================================

/// Deadline enforced on the interactive "test this script" path.
pub const VALIDATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Evaluates a script under the validation deadline and returns the canonical
/// result in its JSON wire form.
///
/// This is the interactive preview path: the worker is abandoned on expiry,
/// so side effects of a timed-out script may still land.
///
/// # Errors
///
/// Returns [`ProviderError::Timeout`] when the deadline expires, otherwise
/// the wrapped evaluation or normalization failure.
pub fn test_script(
    evaluator: &ScriptEvaluator,
    source: &str,
    sandboxed: bool,
    classpath: &[ClasspathEntry],
    variables: &VariableMap,
) -> Result<String, ProviderError> {
    let evaluator = evaluator.clone();
    let source = source.to_string();
    let classpath = classpath.to_vec();
    let bindings = resolved_bindings(variables);
    let outcome = run_with_timeout(
        move || -> Result<CanonicalResult, ProviderError> {
            let result = evaluator.evaluate(&source, sandboxed, &classpath, &bindings)?;
            Ok(normalize(result)?)
        },
        VALIDATION_TIMEOUT,
    )?;
    let options = outcome?;
    serde_json::to_string(&options).map_err(|err| {
        ProviderError::Normalize(NormalizeError::Serialize {
            detail: err.to_string(),
        })
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves variable references inside binding values against the map itself.
fn resolved_bindings(variables: &VariableMap) -> VariableMap {
    variables
        .iter()
        .map(|(name, value)| (name.clone(), resolve_variables(value, variables)))
        .collect()
}
