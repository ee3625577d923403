// src/lib.rs
//! Transparent HTTP request redirection through a forwarder service.
//!
//! Outgoing requests whose destination matches the installed policy are
//! rewritten to `<base_url>/forward?url=<original target>` and dispatched
//! to the forwarder, which relays them to the real target and returns the
//! response unchanged. Every other request, including any addressed to the
//! forwarder itself, goes out exactly as issued. Call sites never change:
//! the caller cannot tell a relayed response from a direct one.
//!
//! # Modules
//!
//! - **redirect**: policy model, shared state, request rewriting
//! - **transport**: the dispatch seam over the underlying HTTP client
//! - **client**: policy-wrapped client decorator
//! - **error**: activation-time error types
//!
//! # Example
//!
//! ```no_run
//! use request_forwarder::{ForwardingClient, RedirectConfig, Redirector};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let redirector = Redirector::new();
//! redirector.activate(
//!     RedirectConfig::new("secret")
//!         .with_base_url("https://my-relay.example.com")
//!         .with_hosts(["httpbin.org"]),
//! )?;
//!
//! let client = ForwardingClient::new(redirector);
//! let req = http::Request::get("https://httpbin.org/ip").body(bytes::Bytes::new())?;
//! let resp = client.send(req).await?; // relayed through the forwarder
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod redirect;
pub mod transport;

// Re-export commonly used types
pub use client::ForwardingClient;
pub use error::{ConfigError, Result};
pub use redirect::{InterceptMode, RedirectConfig, Redirector};
pub use transport::HttpTransport;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
