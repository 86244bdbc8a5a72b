// crates/optionset-providers/src/remote.rs
// ============================================================================
// Module: Remote Option Provider
// Description: HTTP fetcher and the remote provider strategy built on it.
// Purpose: Fetch raw option data from a configured endpoint with optional auth.
// Dependencies: optionset-core, reqwest, base64, tracing
// ============================================================================

//! ## Overview
//! The remote fetcher issues a single GET per invocation with a fixed header
//! set (`Accept-Encoding: gzip,deflate`, `Accept: */*`) and an optional Basic
//! authorization header. The whole body is read as UTF-8 text under a hard
//! size ceiling; the connection is released on every exit path.
//! Invariants:
//! - One attempt per invocation; retries are the caller's responsibility.
//! - No enforced request deadline by default: the production fetch path is
//!   deliberately unbounded, unlike the interactive validation path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use optionset_core::Credential;
use optionset_core::CredentialStore;
use optionset_core::FetchError;
use optionset_core::OptionsProvider;
use optionset_core::ProviderContext;
use optionset_core::ProviderData;
use optionset_core::ProviderError;
use optionset_core::RemoteConfig;
use optionset_core::resolve_variables;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header;

use crate::credentials::resolve_credential;
use crate::error_chain;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the remote fetcher.
///
/// # Invariants
/// - `max_response_bytes` is enforced as a hard upper bound on response bodies.
/// - `timeout_ms = None` disables the request deadline entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFetcherConfig {
    /// Optional request timeout in milliseconds; `None` means unbounded.
    pub timeout_ms: Option<u64>,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for RemoteFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            max_response_bytes: 4 * 1024 * 1024,
            user_agent: "optionset/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Fetcher
// ============================================================================

/// HTTP fetcher issuing resolved, optionally-authenticated GET requests.
///
/// # Invariants
/// - Sends exactly `Accept-Encoding: gzip,deflate` and `Accept: */*`.
/// - Adds `Authorization: Basic <base64(user:secret)>` only when a credential
///   is present.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    /// Fetcher configuration, including the body size ceiling.
    config: RemoteFetcherConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl RemoteFetcher {
    /// Creates a new fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the HTTP client cannot be created.
    pub fn new(config: RemoteFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout_ms.map(Duration::from_millis))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| FetchError::Transport {
                detail: err.to_string(),
            })?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Performs a single GET and returns the whole body as UTF-8 text.
    ///
    /// The URL must already have its variables resolved.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any network, protocol, or decode failure.
    pub fn fetch(&self, url: &str, credential: Option<&Credential>) -> Result<String, FetchError> {
        let url = Url::parse(url).map_err(|err| FetchError::InvalidUrl {
            detail: err.to_string(),
        })?;
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT_ENCODING, "gzip,deflate")
            .header(header::ACCEPT, "*/*");
        if let Some(credential) = credential {
            let token = STANDARD.encode(format!("{}:{}", credential.username, credential.secret));
            request = request.header(header::AUTHORIZATION, format!("Basic {token}"));
        }
        let response = request.send().map_err(|err| FetchError::Transport {
            detail: err.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = read_body_limited(response, self.config.max_response_bytes)?;
        String::from_utf8(body).map_err(|err| FetchError::Body {
            detail: err.to_string(),
        })
    }
}

/// Reads the response body while enforcing the byte ceiling.
fn read_body_limited(response: Response, max_bytes: usize) -> Result<Vec<u8>, FetchError> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut body = Vec::new();
    let mut handle = response.take(limit);
    handle.read_to_end(&mut body).map_err(|err| FetchError::Body {
        detail: err.to_string(),
    })?;
    if body.len() > max_bytes {
        return Err(FetchError::TooLarge {
            max_bytes,
        });
    }
    Ok(body)
}

// ============================================================================
// SECTION: Remote Provider
// ============================================================================

/// Provider strategy fetching raw option data from a remote endpoint.
///
/// Narrowing by query happens client-side on the raw text, so `filter` keeps
/// the not-supported default.
pub struct RemoteProvider {
    /// Immutable provider configuration.
    config: RemoteConfig,
    /// Host credential store consulted per fetch.
    store: Arc<dyn CredentialStore>,
    /// Fetcher issuing the actual requests.
    fetcher: RemoteFetcher,
}

impl RemoteProvider {
    /// Creates a remote provider around a configuration and credential store.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the HTTP client cannot be created.
    pub fn new(
        config: RemoteConfig,
        store: Arc<dyn CredentialStore>,
        fetcher_config: RemoteFetcherConfig,
    ) -> Result<Self, ProviderError> {
        let fetcher = RemoteFetcher::new(fetcher_config)?;
        Ok(Self {
            config,
            store,
            fetcher,
        })
    }

    /// Resolves the URL, resolves the credential, and performs the fetch.
    fn produce_inner(&self, ctx: &ProviderContext) -> Result<ProviderData, ProviderError> {
        let url = resolve_variables(&self.config.url, &ctx.variables);
        let credential =
            resolve_credential(self.store.as_ref(), &url, self.config.credential_id.as_deref())?;
        let body = self.fetcher.fetch(&url, credential.as_ref())?;
        Ok(ProviderData::Raw(body))
    }
}

impl OptionsProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn produce(&self, ctx: &ProviderContext) -> Result<ProviderData, ProviderError> {
        self.produce_inner(ctx).map_err(|err| {
            tracing::error!(provider = self.name(), error = %error_chain(&err), "option fetch failed");
            err
        })
    }
}
