// crates/optionset-providers/src/script/evaluator.rs
// ============================================================================
// Module: Sandboxed Script Evaluator
// Description: Evaluation of untrusted scripts with injected bindings.
// Purpose: Run one script to completion inside an isolation boundary.
// Dependencies: optionset-core, rhai, crate::remote
// ============================================================================

//! ## Overview
//! Each evaluation builds a fresh engine and scope: every binding is pushed
//! as a string constant, an `http` helper object is injected so scripts can
//! issue outbound GETs, and classpath libraries are loaded into a static
//! module resolver (imports outside the classpath fail). When the script is
//! marked sandboxed, the configured [`SandboxPolicy`] hardens the engine
//! before any untrusted code runs, library loading included.
//! Invariants:
//! - No state persists across calls; each call gets a fresh binding scope.
//! - The raw engine value is classified into the tagged result union at this
//!   boundary; nothing engine-specific escapes the module.

// ============================================================================
// SECTION: Imports
// ============================================================================

use optionset_core::ClasspathEntry;
use optionset_core::EvaluationError;
use optionset_core::EvaluationResult;
use optionset_core::OptionEntry;
use optionset_core::VariableMap;
use rhai::Dynamic;
use rhai::Engine;
use rhai::EvalAltResult;
use rhai::Module;
use rhai::Scope;
use rhai::module_resolvers::StaticModuleResolver;

use crate::remote::RemoteFetcher;
use crate::script::policy::SandboxPolicy;

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Sandboxed evaluator for user-supplied scripts.
///
/// # Invariants
/// - Owns no engine state; a fresh engine and scope are built per call.
/// - The fetcher backs both classpath loading and the in-script `http`
///   helper.
#[derive(Debug, Clone)]
pub struct ScriptEvaluator {
    /// Fetcher used for classpath libraries and the `http` helper.
    fetcher: RemoteFetcher,
    /// Rule set applied when a script is marked sandboxed.
    policy: SandboxPolicy,
}

impl ScriptEvaluator {
    /// Creates an evaluator around a fetcher and sandbox policy.
    #[must_use]
    pub const fn new(fetcher: RemoteFetcher, policy: SandboxPolicy) -> Self {
        Self {
            fetcher,
            policy,
        }
    }

    /// Evaluates a script against the given bindings and classpath.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] when a classpath library fails to load or
    /// the script fails to parse or raises at runtime.
    pub fn evaluate(
        &self,
        source: &str,
        sandboxed: bool,
        classpath: &[ClasspathEntry],
        bindings: &VariableMap,
    ) -> Result<EvaluationResult, EvaluationError> {
        let mut engine = Engine::new();
        engine
            .register_type_with_name::<HttpHelper>("Http")
            .register_fn("get", HttpHelper::get);
        // Harden before loading libraries: classpath sources run top-level
        // code at load time and must hit the same ceilings as the script.
        if sandboxed {
            self.policy.apply(&mut engine);
        }
        let resolver = self.load_libraries(&engine, classpath)?;
        engine.set_module_resolver(resolver);

        let mut scope = Scope::new();
        for (name, value) in bindings {
            scope.push_constant(name.clone(), value.clone());
        }
        scope.push_constant("http", HttpHelper::new(self.fetcher.clone()));

        let value = engine.eval_with_scope::<Dynamic>(&mut scope, source).map_err(|err| {
            EvaluationError::Script {
                detail: err.to_string(),
            }
        })?;
        Ok(classify(value))
    }

    /// Fetches and compiles classpath libraries into a module resolver.
    ///
    /// Load order is preserved; a later entry with the same module name
    /// overrides an earlier one.
    fn load_libraries(
        &self,
        engine: &Engine,
        classpath: &[ClasspathEntry],
    ) -> Result<StaticModuleResolver, EvaluationError> {
        let mut resolver = StaticModuleResolver::new();
        for entry in classpath {
            let source = self.fetcher.fetch(&entry.url, None).map_err(|err| {
                EvaluationError::Library {
                    url: entry.url.clone(),
                    detail: err.to_string(),
                }
            })?;
            let ast = engine.compile(&source).map_err(|err| EvaluationError::Library {
                url: entry.url.clone(),
                detail: err.to_string(),
            })?;
            let module =
                Module::eval_ast_as_new(Scope::new(), &ast, engine).map_err(|err| {
                    EvaluationError::Library {
                        url: entry.url.clone(),
                        detail: err.to_string(),
                    }
                })?;
            resolver.insert(module_name(&entry.url), module);
        }
        Ok(resolver)
    }
}

// ============================================================================
// SECTION: HTTP Helper
// ============================================================================

/// Capability object exposed to scripts as the `http` constant.
///
/// Scripts call `http.get(url)` to issue an unauthenticated outbound GET
/// through the same fetcher the provider uses.
#[derive(Debug, Clone)]
pub struct HttpHelper {
    /// Fetcher backing the helper's requests.
    fetcher: RemoteFetcher,
}

impl HttpHelper {
    /// Creates a helper around a fetcher.
    #[must_use]
    pub const fn new(fetcher: RemoteFetcher) -> Self {
        Self {
            fetcher,
        }
    }

    /// Issues a GET and returns the body text to the script.
    ///
    /// # Errors
    ///
    /// Returns a script-level runtime error carrying the fetch diagnostic.
    pub fn get(&mut self, url: &str) -> Result<String, Box<EvalAltResult>> {
        self.fetcher.fetch(url, None).map_err(|err| err.to_string().into())
    }
}

// ============================================================================
// SECTION: Result Classification
// ============================================================================

/// Classifies the raw engine value into the tagged result union.
fn classify(value: Dynamic) -> EvaluationResult {
    if value.is_unit() {
        return EvaluationResult::Absent;
    }
    if value.is_string() {
        return EvaluationResult::Scalar(value.into_string().unwrap_or_default());
    }
    if value.is_array() {
        let items = value.into_array().unwrap_or_default();
        return EvaluationResult::Collection(items.into_iter().map(entry_from_dynamic).collect());
    }
    EvaluationResult::Other {
        type_name: value.type_name().to_string(),
    }
}

/// Maps one array element onto a canonical entry.
///
/// Strings stay plain; maps with `value`/`label` string fields become pairs
/// (label defaulting to the value); everything else is coerced to its display
/// string.
fn entry_from_dynamic(item: Dynamic) -> OptionEntry {
    if item.is_string() {
        return OptionEntry::Plain(item.into_string().unwrap_or_default());
    }
    if item.is_map() {
        let rendered = item.to_string();
        let Some(map) = item.try_cast::<rhai::Map>() else {
            return OptionEntry::Plain(rendered);
        };
        let value = map.get("value").and_then(|entry| entry.clone().into_string().ok());
        let label = map.get("label").and_then(|entry| entry.clone().into_string().ok());
        return match (value, label) {
            (Some(value), Some(label)) => OptionEntry::Labeled {
                value,
                label,
            },
            (Some(value), None) => OptionEntry::Labeled {
                label: value.clone(),
                value,
            },
            _ => OptionEntry::Plain(rendered),
        };
    }
    OptionEntry::Plain(item.to_string())
}

/// Derives a module name from a classpath URL (file stem of the last path
/// segment, `lib` when empty).
fn module_name(url: &str) -> String {
    let tail = url.rsplit('/').next().unwrap_or(url);
    let stem = tail.split('.').next().unwrap_or(tail);
    if stem.is_empty() {
        "lib".to_string()
    } else {
        stem.to_string()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
