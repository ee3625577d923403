// src/redirect/mod.rs
//! Request redirection layer
//!
//! Decides, per outgoing request, whether the destination should be
//! rewritten to route through the forwarder service, and builds the
//! rewritten request when it should.
//!
//! # Architecture
//!
//! ```text
//! Application code
//!     │ http::Request
//!     ▼
//! ForwardingClient ──▶ Redirector::apply ──▶ policy match?
//!     │                                          │
//!     │ no: request unchanged                    │ yes
//!     ▼                                          ▼
//! HttpTransport ◀──── <base_url>/forward?url=<original target>
//!     │                + Authorization / X-Api-Token headers
//!     ▼
//! Forwarder service ──▶ Real target
//! ```
//!
//! The response travels back through the same path without modification.

pub mod engine;
pub mod policy;
pub(crate) mod rewrite;

// Re-export commonly used types
pub use engine::Redirector;
pub use policy::{
    InterceptMode, RedirectConfig, DEFAULT_API_HOST, DEFAULT_FORWARDER_URL, FORWARD_PATH,
};
