/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Runtime configuration and backend address resolution
//!
//! The hosting environment may inject an explicit API base, a host string and
//! the bundle base path (from which the project identifier is extracted). All
//! three are read once, before the client is built, and never change after.

use crate::constants::{
    API_PATH, DEFAULT_API_PORT, PREVIEW_API_PORT, PREVIEW_PROJECT_PREFIX, REQUEST_TIMEOUT_MS,
    STORAGE_NAMESPACE,
};
use crate::utils::config::{get_env_or_none, get_env_trimmed};
use dotenv::dotenv;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the explicit API base URL
pub const API_BASE_ENV: &str = "DALE_API_BASE";
/// Environment variable holding the API host string
pub const API_HOST_ENV: &str = "DALE_API_HOST";
/// Environment variable holding the bundle base path
pub const RUNTIME_BASE_ENV: &str = "DALE_RUNTIME_BASE";
/// Environment variable overriding the request timeout, in milliseconds
pub const REQUEST_TIMEOUT_ENV: &str = "DALE_REQUEST_TIMEOUT_MS";

static RUNTIME_PROJECT_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"/__runtime__/([^/]+)/?").ok());

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
/// Inputs supplied by the hosting environment
pub struct RuntimeConfig {
    /// Explicit base URL override, used verbatim when non-empty
    pub api_base: Option<String>,
    /// Host string, `[scheme://]host[:port][/path]`
    pub api_host: Option<String>,
    /// Bundle base path, e.g. `/__runtime__/<project>/`
    pub runtime_base: Option<String>,
    /// Request timeout override in milliseconds, zero meaning unset
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl RuntimeConfig {
    /// Creates an empty configuration, which resolves to the local fallback
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from the environment, loading `.env` first
    #[must_use]
    pub fn from_env() -> Self {
        dotenv().ok();
        Self {
            api_base: get_env_trimmed(API_BASE_ENV),
            api_host: get_env_trimmed(API_HOST_ENV),
            runtime_base: get_env_trimmed(RUNTIME_BASE_ENV),
            request_timeout_ms: get_env_or_none(REQUEST_TIMEOUT_ENV),
        }
    }

    /// Sets the explicit base URL override
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Sets the host string
    #[must_use]
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    /// Sets the bundle base path
    #[must_use]
    pub fn with_runtime_base(mut self, path: impl Into<String>) -> Self {
        self.runtime_base = Some(path.into());
        self
    }

    /// Sets the request timeout override
    #[must_use]
    pub fn with_request_timeout_ms(mut self, millis: u64) -> Self {
        self.request_timeout_ms = Some(millis);
        self
    }

    /// Request timeout, the override when set and non-zero, else the default
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let millis = self
            .request_timeout_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(REQUEST_TIMEOUT_MS);
        Duration::from_millis(millis)
    }

    /// Project identifier extracted from the bundle base path
    #[must_use]
    pub fn project_id(&self) -> Option<String> {
        self.runtime_base.as_deref().and_then(project_id_from_path)
    }

    /// Whether the project is a preview deployment
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.project_id()
            .is_some_and(|id| id.starts_with(PREVIEW_PROJECT_PREFIX))
    }

    /// Port used when the host string carries none
    #[must_use]
    pub fn default_port(&self) -> u16 {
        if self.is_preview() {
            PREVIEW_API_PORT
        } else {
            DEFAULT_API_PORT
        }
    }

    /// Storage namespace, `dale:<project>` or `dale`
    #[must_use]
    pub fn storage_prefix(&self) -> String {
        match self.project_id() {
            Some(id) => format!("{STORAGE_NAMESPACE}:{id}"),
            None => STORAGE_NAMESPACE.to_string(),
        }
    }

    /// Resolves the backend base address, see [`resolve_api_base`]
    #[must_use]
    pub fn api_base_url(&self) -> String {
        resolve_api_base(self)
    }
}

/// Extracts the project identifier from a `/__runtime__/<id>/` path
///
/// The segment is percent-decoded; an empty or undecodable segment yields `None`.
#[must_use]
pub fn project_id_from_path(path: &str) -> Option<String> {
    let re = RUNTIME_PROJECT_RE.as_ref()?;
    let raw = re.captures(path)?.get(1)?.as_str();
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    (!decoded.is_empty()).then(|| decoded.into_owned())
}

/// Resolves the base address of the REST surface
///
/// 1. A non-empty explicit base wins, with one trailing slash stripped.
/// 2. Otherwise a non-empty host string yields `scheme://host:port/api/v1`,
///    defaulting the scheme to `http` and the port to [`RuntimeConfig::default_port`].
/// 3. Otherwise `http://localhost:<port>/api/v1`.
#[must_use]
pub fn resolve_api_base(config: &RuntimeConfig) -> String {
    let port = config.default_port();
    let fallback = format!("http://localhost:{port}{API_PATH}");

    let explicit = config.api_base.as_deref().map(str::trim).unwrap_or_default();
    if !explicit.is_empty() {
        return explicit.strip_suffix('/').unwrap_or(explicit).to_string();
    }

    let host = config.api_host.as_deref().map(str::trim).unwrap_or_default();
    if host.is_empty() {
        return fallback;
    }

    let (scheme, rest) = match host.find("://") {
        Some(idx) if idx > 0 => (host[..idx].to_lowercase(), &host[idx + 3..]),
        _ => ("http".to_string(), host),
    };
    let host_with_port = rest.split('/').next().unwrap_or_default();
    let mut parts = host_with_port.split(':');
    let hostname = parts.next().unwrap_or_default();
    if hostname.is_empty() {
        return fallback;
    }
    let port = parts
        .next()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| port.to_string());

    format!("{scheme}://{hostname}:{port}{API_PATH}")
}
