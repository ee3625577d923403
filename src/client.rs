// src/client.rs
//! Policy-wrapped HTTP client.

use crate::redirect::Redirector;
use crate::transport::HttpTransport;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};

/// HTTP client decorator that applies a [`Redirector`] policy in front of
/// an underlying transport.
///
/// The wrapper implements [`HttpTransport`] itself, so anything written
/// against that seam accepts a wrapped client in place of a bare one.
/// Share one `Redirector` across clients for process-wide behavior, or
/// give each test its own client and redirector for full isolation; no
/// teardown is needed between tests.
#[derive(Debug, Clone)]
pub struct ForwardingClient<T = reqwest::Client> {
    redirector: Redirector,
    transport: T,
}

impl ForwardingClient<reqwest::Client> {
    /// Wrap a default `reqwest` client.
    pub fn new(redirector: Redirector) -> Self {
        Self::with_transport(redirector, reqwest::Client::new())
    }
}

impl<T: HttpTransport> ForwardingClient<T> {
    /// Wrap a specific transport.
    pub fn with_transport(redirector: Redirector, transport: T) -> Self {
        Self {
            redirector,
            transport,
        }
    }

    /// The policy handle this client consults.
    pub fn redirector(&self) -> &Redirector {
        &self.redirector
    }

    /// Send one request, redirecting it through the forwarder when the
    /// active policy matches its destination.
    ///
    /// The response and any error come straight from the transport; the
    /// caller cannot tell a relayed response from a direct one.
    pub async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>, T::Error> {
        let req = self.redirector.apply(req);
        self.transport.send(req).await
    }
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for ForwardingClient<T> {
    type Error = T::Error;

    async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>, Self::Error> {
        let req = self.redirector.apply(req);
        self.transport.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::RedirectConfig;
    use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
    use http::StatusCode;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// In-memory transport that records every dispatched request and
    /// answers with a canned JSON response.
    #[derive(Debug, Clone, Default)]
    struct RecordingTransport {
        sent: Arc<Mutex<Vec<Request<Bytes>>>>,
    }

    impl RecordingTransport {
        fn sent(&self) -> Vec<Request<Bytes>> {
            std::mem::take(&mut *self.sent.lock())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("transport unreachable")]
    struct Unreachable;

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        type Error = Unreachable;

        async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>, Unreachable> {
            self.sent.lock().push(req);
            let mut resp = Response::new(Bytes::from_static(b"{\"ok\":true}"));
            *resp.status_mut() = StatusCode::OK;
            resp.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Ok(resp)
        }
    }

    /// Transport that always fails, for error pass-through checks.
    #[derive(Debug, Clone, Default)]
    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        type Error = Unreachable;

        async fn send(&self, _req: Request<Bytes>) -> Result<Response<Bytes>, Unreachable> {
            Err(Unreachable)
        }
    }

    fn get(url: &str) -> Request<Bytes> {
        Request::builder().uri(url).body(Bytes::new()).unwrap()
    }

    #[tokio::test]
    async fn test_send_rewrites_matching_request() {
        let redirector = Redirector::new();
        redirector
            .activate(
                RedirectConfig::new("tok")
                    .with_base_url("https://fw.test")
                    .with_hosts(["httpbin.org"]),
            )
            .unwrap();

        let transport = RecordingTransport::default();
        let client = ForwardingClient::with_transport(redirector, transport.clone());

        let resp = client.send(get("https://httpbin.org/ip")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(resp.body().as_ref(), b"{\"ok\":true}");

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].uri().host(), Some("fw.test"));
        assert_eq!(sent[0].uri().path(), "/forward");
        assert_eq!(sent[0].headers()[AUTHORIZATION], "Bearer tok");
    }

    #[tokio::test]
    async fn test_send_passthrough_when_inactive() {
        let transport = RecordingTransport::default();
        let client = ForwardingClient::with_transport(Redirector::new(), transport.clone());

        client.send(get("https://httpbin.org/ip")).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].uri().to_string(), "https://httpbin.org/ip");
        assert!(sent[0].headers().is_empty());
    }

    #[tokio::test]
    async fn test_activation_reaches_already_constructed_clients() {
        let redirector = Redirector::new();
        let transport = RecordingTransport::default();
        // Client built before the policy exists.
        let client = ForwardingClient::with_transport(redirector.clone(), transport.clone());

        client.send(get("https://httpbin.org/ip")).await.unwrap();
        redirector
            .activate(
                RedirectConfig::new("tok")
                    .with_base_url("https://fw.test")
                    .with_hosts(["httpbin.org"]),
            )
            .unwrap();
        client.send(get("https://httpbin.org/ip")).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].uri().host(), Some("httpbin.org"));
        assert_eq!(sent[1].uri().host(), Some("fw.test"));
    }

    #[tokio::test]
    async fn test_clients_are_isolated() {
        // Repeated install/teardown leaves nothing behind: each iteration
        // gets a fresh redirector, and a sibling client with its own
        // redirector is never affected.
        let bystander_transport = RecordingTransport::default();
        let bystander =
            ForwardingClient::with_transport(Redirector::new(), bystander_transport.clone());

        for _ in 0..3 {
            let redirector = Redirector::new();
            redirector
                .activate(
                    RedirectConfig::new("tok")
                        .with_base_url("https://fw.test")
                        .with_intercept_all(),
                )
                .unwrap();
            let transport = RecordingTransport::default();
            let client = ForwardingClient::with_transport(redirector, transport.clone());

            client.send(get("https://httpbin.org/ip")).await.unwrap();
            assert_eq!(transport.sent()[0].uri().host(), Some("fw.test"));

            bystander.send(get("https://httpbin.org/ip")).await.unwrap();
            assert_eq!(
                bystander_transport.sent()[0].uri().host(),
                Some("httpbin.org")
            );
        }
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let redirector = Redirector::new();
        redirector.activate(RedirectConfig::new("tok")).unwrap();
        let client = ForwardingClient::with_transport(redirector, FailingTransport);

        let err = client.send(get("https://api.telegram.org/getMe")).await;
        assert!(matches!(err, Err(Unreachable)));
    }

    #[tokio::test]
    async fn test_wrapped_client_substitutes_for_transport() {
        async fn fetch<T: HttpTransport>(transport: &T) -> Result<StatusCode, T::Error> {
            let resp = transport.send(get("https://httpbin.org/ip")).await?;
            Ok(resp.status())
        }

        let bare = RecordingTransport::default();
        assert_eq!(fetch(&bare).await.unwrap(), StatusCode::OK);

        let wrapped = ForwardingClient::with_transport(Redirector::new(), bare);
        assert_eq!(fetch(&wrapped).await.unwrap(), StatusCode::OK);
    }
}
