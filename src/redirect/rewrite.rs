// src/redirect/rewrite.rs
//! Construction of the forwarded form of an intercepted request.
//!
//! Only the URL, query string and the two auth headers change. Method,
//! body, HTTP version and every other header are carried over untouched,
//! so the forwarder receives the request exactly as the caller built it.

use crate::redirect::policy::Policy;
use http::header::{HeaderName, AUTHORIZATION};
use http::{Request, Uri};
use tracing::debug;
use url::Url;

/// Header carrying the raw token, alongside `Authorization: Bearer`.
/// The forwarder accepts either.
pub(crate) const X_API_TOKEN: HeaderName = HeaderName::from_static("x-api-token");

/// Apply the redirect decision to one request.
///
/// Returns the request untouched when the destination does not match the
/// policy, when it is the forwarder itself, or when the request URI is not
/// an absolute URL this engine can evaluate. There is no error path: a
/// request is either fully rewritten or sent exactly as issued.
pub(crate) fn apply<B>(policy: &Policy, req: Request<B>) -> Request<B> {
    let target = match Url::parse(&req.uri().to_string()) {
        Ok(url) => url,
        Err(_) => return req,
    };
    let host = match target.host_str() {
        Some(host) => host,
        None => return req,
    };
    if !policy.matches(host) {
        return req;
    }

    let forward_uri = match forward_uri(policy, &target) {
        Some(uri) => uri,
        None => return req,
    };

    debug!("redirecting {} {} -> {}", req.method(), target, forward_uri);

    let (mut parts, body) = req.into_parts();
    parts.uri = forward_uri;
    parts.headers.insert(AUTHORIZATION, policy.bearer.clone());
    parts.headers.insert(X_API_TOKEN, policy.api_token.clone());
    Request::from_parts(parts, body)
}

/// Build `<base_url>/forward?<original query>&url=<original target>`.
///
/// The original query pairs ride alongside the `url` parameter so the
/// forwarder can relay them. A caller-supplied pair literally named `url`
/// is dropped from the merged query; it still survives inside the embedded
/// target URL, and the real target always wins at the forwarder.
fn forward_uri(policy: &Policy, target: &Url) -> Option<Uri> {
    let mut forward = policy.forward_url.clone();
    {
        let mut pairs = forward.query_pairs_mut();
        for (key, value) in target.query_pairs() {
            if key != "url" {
                pairs.append_pair(&key, &value);
            }
        }
        pairs.append_pair("url", target.as_str());
    }
    Uri::try_from(forward.as_str()).ok()
}
