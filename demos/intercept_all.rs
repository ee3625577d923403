// demos/intercept_all.rs
//! Route every outgoing request through the forwarder.
//!
//! Useful when the local network blocks many external APIs and all traffic
//! needs to go through a relay. Requests to the forwarder itself are never
//! re-intercepted.
//!
//! Usage:
//!     FORWARDER_TOKEN=... [FORWARDER_URL=...] cargo run --example intercept_all

use anyhow::Result;
use bytes::Bytes;
use http::Request;
use request_forwarder::{ForwardingClient, RedirectConfig, Redirector};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let redirector = Redirector::new();
    redirector.activate(RedirectConfig::from_env()?.with_intercept_all())?;

    let client = ForwardingClient::new(redirector);

    // All of these go through the forwarder.
    for target in [
        "https://httpbin.org/ip",
        "https://jsonplaceholder.typicode.com/todos/1",
        "https://api.github.com/zen",
    ] {
        let req = Request::get(target).body(Bytes::new())?;
        let resp = client.send(req).await?;
        println!("{} -> {}", target, resp.status());
        println!("{}", String::from_utf8_lossy(resp.body()));
    }

    Ok(())
}
