// src/redirect/engine.rs
//! Shared redirection state and the per-request decision entry point.

use crate::error::Result;
use crate::redirect::policy::{InterceptMode, Policy, RedirectConfig};
use crate::redirect::rewrite;
use http::Request;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Handle to a redirection policy, shared by any number of clients.
///
/// Cloning is cheap; every clone reads and writes the same state, so a
/// single handle shared across an application gives process-wide behavior,
/// while each test can construct its own for full isolation. Policy swaps
/// are atomic: a request in flight observes either the fully-old or the
/// fully-new configuration, never a mix.
#[derive(Debug, Clone, Default)]
pub struct Redirector {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    active: bool,
    policy: Option<Arc<Policy>>,
}

impl Redirector {
    /// An inactive redirector. Requests pass through until
    /// [`activate`](Self::activate) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and install a redirection policy.
    ///
    /// Validation happens before any state is touched: a failed activation
    /// leaves the previous configuration, active or not, fully intact.
    /// Calling this while already active replaces the whole configuration.
    /// Takes effect for every subsequent request from every client holding
    /// this handle, including clients constructed before the call.
    pub fn activate(&self, config: RedirectConfig) -> Result<()> {
        let policy = Policy::compile(&config)?;

        let mut state = self.state.write();
        if state.active {
            warn!("redirector already active, replacing configuration");
        }
        match policy.mode {
            InterceptMode::InterceptAll => {
                info!("Redirection active for all hosts, routing through {}", policy.base_url);
            }
            _ => {
                let mut hosts: Vec<&str> = policy.hosts.iter().map(String::as_str).collect();
                hosts.sort_unstable();
                info!(
                    "Redirection active for {}, routing through {}",
                    hosts.join(", "),
                    policy.base_url
                );
            }
        }
        state.policy = Some(Arc::new(policy));
        state.active = true;
        Ok(())
    }

    /// Stop redirecting.
    ///
    /// Flag-only: the stored configuration is retained and stays
    /// inspectable through the getters. A fresh [`activate`](Self::activate)
    /// call is required to resume. Idempotent.
    pub fn deactivate(&self) {
        let mut state = self.state.write();
        if !state.active {
            warn!("redirector is not active, nothing to deactivate");
            return;
        }
        state.active = false;
        info!("Redirection deactivated, requests now go direct");
    }

    /// Whether requests are currently being redirected.
    pub fn is_active(&self) -> bool {
        self.state.read().active
    }

    /// Last-configured forwarder base URL, retained across deactivation.
    /// `None` before the first successful activation.
    pub fn forwarder_url(&self) -> Option<String> {
        self.state.read().policy.as_ref().map(|p| p.base_url.clone())
    }

    /// Copy of the configured host set, retained across deactivation.
    ///
    /// Empty in intercept-all mode: an empty set while
    /// [`is_active`](Self::is_active) returns `true` means every host is
    /// redirected, not none. Check [`mode`](Self::mode) to disambiguate.
    pub fn intercepted_hosts(&self) -> HashSet<String> {
        self.state
            .read()
            .policy
            .as_ref()
            .map(|p| p.hosts.clone())
            .unwrap_or_default()
    }

    /// Mode of the last-configured policy, if any.
    pub fn mode(&self) -> Option<InterceptMode> {
        self.state.read().policy.as_ref().map(|p| p.mode)
    }

    /// Apply the redirection decision to one outgoing request.
    ///
    /// Returns the request untouched when inactive, when the destination
    /// does not match the policy, or when the destination is the forwarder
    /// itself. The body type is generic and never inspected.
    pub fn apply<B>(&self, req: Request<B>) -> Request<B> {
        let policy = {
            let state = self.state.read();
            match (&state.policy, state.active) {
                (Some(policy), true) => Arc::clone(policy),
                _ => return req,
            }
        };
        rewrite::apply(&policy, req)
    }
}
