// demos/selected_hosts.rs
//! Relay only an explicit list of hosts; everything else goes direct.
//!
//! Usage:
//!     FORWARDER_TOKEN=... [FORWARDER_URL=...] cargo run --example selected_hosts

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
    redirector.activate(RedirectConfig::from_env()?.with_hosts(["httpbin.org"]))?;

    let client = ForwardingClient::new(redirector.clone());

    // Relayed: httpbin.org is on the list.
    let resp = client
        .send(Request::get("https://httpbin.org/ip").body(Bytes::new())?)
        .await?;
    println!("httpbin via forwarder: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));

    // Direct: api.github.com is not.
    let resp = client
        .send(Request::get("https://api.github.com/zen").body(Bytes::new())?)
        .await?;
    println!("github direct: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));

    println!("intercepted hosts: {:?}", redirector.intercepted_hosts());

    Ok(())
}
