// crates/optionset-providers/tests/script_provider_unit.rs
// ============================================================================
// Module: Script Provider Unit Tests
// Description: Evaluation, normalization, sandbox, and capability tests.
// Purpose: Pin the script strategy's output contract and refusal semantics.
// ============================================================================

//! ## Overview
//! Unit tests for the script strategy:
//! - Scalar JSON-array strings, raw collections, and absent results all
//!   normalize to the canonical sequence.
//! - Bindings are injected per evaluation; `filter` always refuses.
//! - Sandbox ceilings stop runaway scripts; the `http` helper and classpath
//!   modules work against a local HTTP fixture.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::thread;

use optionset_core::ClasspathEntry;
use optionset_core::OptionEntry;
use optionset_core::OptionsProvider;
use optionset_core::ProviderContext;
use optionset_core::ProviderData;
use optionset_core::ProviderError;
use optionset_core::ScriptConfig;
use optionset_core::VariableMap;
use optionset_providers::RemoteFetcher;
use optionset_providers::RemoteFetcherConfig;
use optionset_providers::SandboxPolicy;
use optionset_providers::ScriptEvaluator;
use optionset_providers::ScriptProvider;
use optionset_providers::test_script;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Builds a script provider with default fetcher and sandbox settings.
fn provider(source: &str) -> ScriptProvider {
    provider_with(source, false, Vec::new(), SandboxPolicy::default())
}

/// Builds a script provider with explicit sandbox and classpath settings.
fn provider_with(
    source: &str,
    sandboxed: bool,
    classpath: Vec<ClasspathEntry>,
    policy: SandboxPolicy,
) -> ScriptProvider {
    ScriptProvider::new(
        ScriptConfig {
            source: source.to_string(),
            sandboxed,
            classpath,
        },
        RemoteFetcherConfig::default(),
        policy,
    )
    .unwrap()
}

/// Builds an evaluator with default fetcher and sandbox settings.
fn evaluator() -> ScriptEvaluator {
    ScriptEvaluator::new(
        RemoteFetcher::new(RemoteFetcherConfig::default()).unwrap(),
        SandboxPolicy::default(),
    )
}

/// Builds a provider context from literal variable pairs.
fn context(pairs: &[(&str, &str)]) -> ProviderContext {
    let variables: VariableMap =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    ProviderContext::new(variables)
}

/// Serves one request with the given body.
fn serve_once(body: &'static str) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let _ = request.respond(Response::from_string(body));
        }
    });
    format!("http://{addr}")
}

/// Unwraps provider data into its canonical entries.
fn options(data: ProviderData) -> Vec<OptionEntry> {
    match data {
        ProviderData::Options(entries) => entries,
        ProviderData::Raw(raw) => panic!("expected options, got raw {raw:?}"),
    }
}

/// Shorthand for a plain entry.
fn plain(text: &str) -> OptionEntry {
    OptionEntry::Plain(text.to_string())
}

// ============================================================================
// SECTION: Output Shapes
// ============================================================================

/// Tests that a scalar JSON-array string normalizes to plain entries.
#[test]
fn scalar_json_array_string_normalizes() {
    let produced = provider(r#""[\"x\",\"y\"]""#).produce(&context(&[])).unwrap();
    assert_eq!(options(produced), vec![plain("x"), plain("y")]);
}

/// Tests that a script returning nothing yields the empty sequence.
#[test]
fn absent_result_normalizes_to_empty() {
    let produced = provider("()").produce(&context(&[])).unwrap();
    assert_eq!(options(produced), Vec::<OptionEntry>::new());
}

/// Tests that an array result maps element-wise onto entries.
#[test]
fn array_result_passes_through() {
    let produced = provider(r#"["a", "b"]"#).produce(&context(&[])).unwrap();
    assert_eq!(options(produced), vec![plain("a"), plain("b")]);
}

/// Tests that map elements keep their value and label fields.
#[test]
fn map_entries_become_labeled_options() {
    let produced =
        provider(r#"[#{value: "v", label: "L"}, #{value: "w"}]"#).produce(&context(&[])).unwrap();
    assert_eq!(options(produced), vec![
        OptionEntry::Labeled {
            value: "v".to_string(),
            label: "L".to_string(),
        },
        OptionEntry::Labeled {
            value: "w".to_string(),
            label: "w".to_string(),
        },
    ]);
}

/// Tests that a non-string, non-array result fails normalization.
#[test]
fn numeric_result_is_unsupported() {
    let err = provider("42").produce(&context(&[])).unwrap_err();
    assert!(matches!(err, ProviderError::Normalize(_)));
}

/// Tests that a scalar which is not a JSON array fails normalization.
#[test]
fn non_json_scalar_fails_normalization() {
    let err = provider(r#""not json""#).produce(&context(&[])).unwrap_err();
    assert!(matches!(err, ProviderError::Normalize(_)));
}

/// Tests that a runtime failure surfaces as an evaluation error.
#[test]
fn script_runtime_error_surfaces_as_evaluation_failure() {
    let err = provider("undefined_function()").produce(&context(&[])).unwrap_err();
    assert!(matches!(err, ProviderError::Evaluation(_)));
}

// ============================================================================
// SECTION: Bindings and Capabilities
// ============================================================================

/// Tests that context variables are visible to the script as bindings.
#[test]
fn variables_injected_as_bindings() {
    let produced = provider("[ENVX]").produce(&context(&[("ENVX", "path")])).unwrap();
    assert_eq!(options(produced), vec![plain("path")]);
}

/// Tests that binding values are resolved against the map before injection.
#[test]
fn binding_values_are_resolved_before_injection() {
    let produced = provider("[FULL]")
        .produce(&context(&[("FULL", "${HOST}/x"), ("HOST", "h")]))
        .unwrap();
    assert_eq!(options(produced), vec![plain("h/x")]);
}

/// Tests that the `http` helper issues a GET from inside the script.
#[test]
fn http_helper_fetches_inside_script() {
    let url = serve_once(r#"["remote-a","remote-b"]"#);
    let source = format!(r#"http.get("{url}")"#);
    let produced = provider(&source).produce(&context(&[])).unwrap();
    assert_eq!(options(produced), vec![plain("remote-a"), plain("remote-b")]);
}

/// Tests that a fetched classpath library is importable by name.
#[test]
fn classpath_module_is_importable() {
    let url = serve_once("fn double(x) { x * 2 }");
    let classpath = vec![ClasspathEntry {
        url: format!("{url}/mathlib.rhai"),
    }];
    let source = r#"import "mathlib" as m; [m::double(21).to_string()]"#;
    let produced =
        provider_with(source, false, classpath, SandboxPolicy::default())
            .produce(&context(&[]))
            .unwrap();
    assert_eq!(options(produced), vec![plain("42")]);
}

/// Tests that an unreachable classpath entry fails the whole evaluation.
#[test]
fn missing_classpath_library_fails_evaluation() {
    let classpath = vec![ClasspathEntry {
        url: "http://127.0.0.1:1/unreachable.rhai".to_string(),
    }];
    let err = provider_with("[]", false, classpath, SandboxPolicy::default())
        .produce(&context(&[]))
        .unwrap_err();
    assert!(matches!(err, ProviderError::Evaluation(_)));
}

// ============================================================================
// SECTION: Sandbox and Refusals
// ============================================================================

/// Tests that the operation ceiling aborts an infinite loop.
#[test]
fn sandbox_ceiling_stops_runaway_script() {
    let policy = SandboxPolicy {
        max_operations: 10_000,
        ..SandboxPolicy::default()
    };
    let err = provider_with("loop { }", true, Vec::new(), policy)
        .produce(&context(&[]))
        .unwrap_err();
    assert!(matches!(err, ProviderError::Evaluation(_)));
}

/// Tests that the operation ceiling also bounds classpath library loading.
#[test]
fn sandbox_ceiling_applies_to_classpath_library() {
    let url = serve_once("let n = 0; while n < 100_000 { n += 1; }");
    let classpath = vec![ClasspathEntry {
        url: format!("{url}/spin.rhai"),
    }];
    let policy = SandboxPolicy {
        max_operations: 10_000,
        ..SandboxPolicy::default()
    };
    let err = provider_with("[]", true, classpath, policy)
        .produce(&context(&[]))
        .unwrap_err();
    assert!(matches!(err, ProviderError::Evaluation(_)));
}

/// Tests that filter refuses for every query, including the empty one.
#[test]
fn filter_always_refuses_regardless_of_query() {
    let script = provider(r#"["a"]"#);
    for query in ["", "a", "anything"] {
        let err = script.filter(query, &context(&[])).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::NotSupported { ref operation, .. } if operation == "filter"
        ));
    }
}

// ============================================================================
// SECTION: Validation Entry
// ============================================================================

/// Tests that validation renders the canonical entries as wire-form JSON.
#[test]
fn test_script_returns_wire_form_json() {
    let rendered = test_script(
        &evaluator(),
        r#""[\"x\",\"y\"]""#,
        true,
        &[],
        &VariableMap::new(),
    )
    .unwrap();
    assert_eq!(rendered, r#"["x","y"]"#);
}

/// Tests that validation reports a parse failure instead of panicking.
#[test]
fn test_script_reports_evaluation_failure() {
    let err = test_script(&evaluator(), "nope(", true, &[], &VariableMap::new()).unwrap_err();
    assert!(matches!(err, ProviderError::Evaluation(_)));
}
