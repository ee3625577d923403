// src/redirect/policy.rs
//! Redirection policy: which hosts are intercepted and where they go.
//!
//! [`RedirectConfig`] is the user-facing activation input. [`Policy`] is the
//! compiled, immutable form the engine consults on every request; it is
//! built once per activation and shared behind an `Arc`, so a configuration
//! swap can never be observed half-applied.

use crate::error::{ConfigError, Result};
use http::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Hostname intercepted when no explicit host list is given.
pub const DEFAULT_API_HOST: &str = "api.telegram.org";

/// Default forwarder base URL (no trailing slash).
pub const DEFAULT_FORWARDER_URL: &str = "https://requests-forwarder.ir";

/// Path appended to the base URL when building the forward target.
pub const FORWARD_PATH: &str = "/forward";

/// Interception mode in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterceptMode {
    /// Only the built-in default host is intercepted.
    DefaultHost,

    /// Only the explicitly configured hosts are intercepted.
    SelectedHosts,

    /// Every host is intercepted, except the forwarder itself.
    InterceptAll,
}

/// Activation parameters for a [`Redirector`](crate::Redirector).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// Token expected by the forwarder. Sent on every redirected request as
    /// both `Authorization: Bearer <token>` and `X-Api-Token: <token>`.
    pub token: String,

    /// Forwarder base URL. [`FORWARD_PATH`] is appended automatically.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hostnames to intercept. Empty means the built-in default host.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Intercept every host (except the forwarder). `hosts` is ignored.
    #[serde(default)]
    pub intercept_all: bool,
}

fn default_base_url() -> String {
    DEFAULT_FORWARDER_URL.to_string()
}

impl RedirectConfig {
    /// Configuration with the default forwarder URL and default host.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: default_base_url(),
            hosts: Vec::new(),
            intercept_all: false,
        }
    }

    /// Point at a different forwarder deployment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Restrict interception to an explicit list of hostnames.
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Intercept everything except the forwarder itself.
    pub fn with_intercept_all(mut self) -> Self {
        self.intercept_all = true;
        self
    }

    /// Build a configuration from `FORWARDER_*` environment variables.
    ///
    /// `FORWARDER_TOKEN` is required. `FORWARDER_URL`, `FORWARDER_HOSTS`
    /// (comma-separated) and `FORWARDER_INTERCEPT_ALL` (`1`/`true`/`yes`)
    /// are optional.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("FORWARDER_TOKEN")
            .map_err(|_| ConfigError::MissingEnv("FORWARDER_TOKEN"))?;
        let mut config = Self::new(token);

        if let Ok(base_url) = std::env::var("FORWARDER_URL") {
            config.base_url = base_url;
        }
        if let Ok(hosts) = std::env::var("FORWARDER_HOSTS") {
            config.hosts = hosts
                .split(',')
                .map(str::trim)
                .filter(|host| !host.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(flag) = std::env::var("FORWARDER_INTERCEPT_ALL") {
            config.intercept_all = matches!(flag.trim(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}

/// Compiled policy snapshot.
///
/// Everything a request needs to make the redirect decision and build the
/// forwarded form is precomputed here, so the per-request path does no
/// validation and cannot fail.
#[derive(Debug)]
pub(crate) struct Policy {
    /// Normalized base URL, trailing slash stripped.
    pub base_url: String,

    /// `<base_url>/forward`, parsed once.
    pub forward_url: Url,

    /// The forwarder's own hostname. Never intercepted, in any mode.
    pub forwarder_host: String,

    pub mode: InterceptMode,

    /// Normalized lowercase hostnames (exact match, no wildcards). Empty in
    /// intercept-all mode.
    pub hosts: HashSet<String>,

    /// `Bearer <token>`, prevalidated as a header value.
    pub bearer: HeaderValue,

    /// The raw token, prevalidated as a header value.
    pub api_token: HeaderValue,
}

impl Policy {
    /// Validate a configuration and compile it into a snapshot.
    pub(crate) fn compile(config: &RedirectConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;
        let forwarder_host = parsed
            .host_str()
            .ok_or_else(|| ConfigError::MissingForwarderHost(base_url.clone()))?
            .to_ascii_lowercase();
        let forward_url = Url::parse(&format!("{base_url}{FORWARD_PATH}")).map_err(|source| {
            ConfigError::InvalidBaseUrl {
                url: base_url.clone(),
                source,
            }
        })?;

        let bearer = HeaderValue::try_from(format!("Bearer {}", config.token))
            .map_err(|_| ConfigError::InvalidTokenValue)?;
        let api_token = HeaderValue::try_from(config.token.as_str())
            .map_err(|_| ConfigError::InvalidTokenValue)?;

        let (mode, hosts) = if config.intercept_all {
            (InterceptMode::InterceptAll, HashSet::new())
        } else if !config.hosts.is_empty() {
            let hosts = config.hosts.iter().map(|host| normalize_host(host)).collect();
            (InterceptMode::SelectedHosts, hosts)
        } else {
            let hosts = std::iter::once(DEFAULT_API_HOST.to_string()).collect();
            (InterceptMode::DefaultHost, hosts)
        };

        Ok(Self {
            base_url,
            forward_url,
            forwarder_host,
            mode,
            hosts,
            bearer,
            api_token,
        })
    }

    /// Decide whether a request to `host` should be redirected.
    ///
    /// The forwarder's own host always passes through. Checking it here,
    /// per request, means later host-list or base-URL changes cannot
    /// reintroduce a forwarding loop.
    pub(crate) fn matches(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        if host == self.forwarder_host {
            debug!("host {} is the forwarder itself, passing through", host);
            return false;
        }
        match self.mode {
            InterceptMode::InterceptAll => true,
            InterceptMode::DefaultHost | InterceptMode::SelectedHosts => {
                self.hosts.contains(&host)
            }
        }
    }
}

/// Normalize a configured hostname: lowercase, scheme/path/port stripped.
pub(crate) fn normalize_host(raw: &str) -> String {
    let mut host = raw.trim();
    if let Some((_scheme, rest)) = host.split_once("://") {
        host = rest;
    }
    if let Some((authority, _path)) = host.split_once('/') {
        host = authority;
    }
    if let Some(bracketed) = host.strip_prefix('[') {
        if let Some((inner, _)) = bracketed.split_once(']') {
            return inner.to_ascii_lowercase();
        }
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => {
            name.to_ascii_lowercase()
        }
        _ => host.to_ascii_lowercase(),
    }
}
