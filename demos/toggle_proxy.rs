// demos/toggle_proxy.rs
//! Turn redirection on and off at runtime.
//!
//! Deactivation only flips the flag; the stored configuration stays
//! inspectable, and a fresh activate call resumes redirection.
//!
//! Usage:
//!     FORWARDER_TOKEN=... [FORWARDER_URL=...] cargo run --example toggle_proxy

use anyhow::Result;
use bytes::Bytes;
use http::Request;
use request_forwarder::{ForwardingClient, RedirectConfig, Redirector};
use tracing_subscriber::EnvFilter;

async fn show_origin(client: &ForwardingClient) -> Result<()> {
    let resp = client
        .send(Request::get("https://httpbin.org/ip").body(Bytes::new())?)
        .await?;
    println!("  {} {}", resp.status(), String::from_utf8_lossy(resp.body()));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RedirectConfig::from_env()?.with_hosts(["httpbin.org"]);
    let redirector = Redirector::new();
    let client = ForwardingClient::new(redirector.clone());

    println!("relayed:");
    redirector.activate(config.clone())?;
    show_origin(&client).await?;

    println!("direct (deactivated, config retained: {:?}):", redirector.forwarder_url());
    redirector.deactivate();
    show_origin(&client).await?;

    println!("relayed again:");
    redirector.activate(config)?;
    show_origin(&client).await?;

    Ok(())
}
