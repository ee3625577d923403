// src/transport.rs
//! The dispatch seam between the redirection engine and the HTTP client.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};

/// Capability interface of an underlying HTTP client.
///
/// [`ForwardingClient`](crate::ForwardingClient) composes in front of any
/// implementation. Errors carry the implementor's own type, so a caller's
/// existing error handling keeps working whether or not redirection is in
/// the path.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Error produced by the underlying client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send one request and return the response as the client produced it.
    async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>, Self::Error>;
}

/// Default transport. The response body is collected so the caller gets
/// status, headers and bytes in one piece; the error is plain
/// [`reqwest::Error`].
#[async_trait]
impl HttpTransport for reqwest::Client {
    type Error = reqwest::Error;

    async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>, Self::Error> {
        let req = reqwest::Request::try_from(req)?;
        let resp = self.execute(req).await?;

        let status = resp.status();
        let version = resp.version();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        let mut out = Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}
