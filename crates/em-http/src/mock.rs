//! Scripted in-memory transport.
//!
//! [`MockTransport`] answers requests from per-URL reply queues and records
//! every request it sees. Unscripted URLs answer `404`. When a queue holds a
//! single reply, that reply repeats for every later request.
//!
//! ```
//! use em_http::mock::{MockReply, MockTransport};
//! use em_http::{HeaderProfile, Method, Transport};
//!
//! # tokio_test_block_on(async {
//! let transport = MockTransport::new()
//!     .on_get("https://a/one", MockReply::status(500))
//!     .on_get("https://a/two", MockReply::text(200, "{}"));
//!
//! let response = transport.get("https://a/two", &HeaderProfile::new()).await.unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(transport.count(Method::Get), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::TransportError;
use crate::headers::HeaderProfile;
use crate::response::HttpResponse;
use crate::transport::{Method, Transport};

/// A scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Respond with a status and body.
    Respond {
        /// Status code.
        status: u16,
        /// Body text.
        body: String,
    },
    /// Fail with [`TransportError::Timeout`].
    Timeout,
    /// Fail with [`TransportError::Unreachable`].
    Unreachable,
}

impl MockReply {
    /// A reply with an empty body.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self::text(status, "")
    }

    /// A reply with a text body.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
        }
    }

    /// A reply with a JSON body.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::text(status, body.to_string())
    }
}

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Request method.
    pub method: Method,
    /// Request URL.
    pub url: String,
    /// Headers sent.
    pub headers: HeaderProfile,
    /// JSON body, for POST requests.
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct State {
    routes: FxHashMap<(Method, String), VecDeque<MockReply>>,
    requests: Vec<RecordedRequest>,
}

/// In-memory [`Transport`] for tests. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    /// Creates a transport with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for GET requests to `url`.
    #[must_use]
    pub fn on_get(self, url: impl Into<String>, reply: MockReply) -> Self {
        self.push(Method::Get, url.into(), reply);
        self
    }

    /// Queues a reply for POST requests to `url`.
    #[must_use]
    pub fn on_post(self, url: impl Into<String>, reply: MockReply) -> Self {
        self.push(Method::Post, url.into(), reply);
        self
    }

    fn push(&self, method: Method, url: String, reply: MockReply) {
        self.state
            .lock()
            .routes
            .entry((method, url))
            .or_default()
            .push_back(reply);
    }

    /// All recorded requests, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    /// Recorded requests with the given method.
    #[must_use]
    pub fn requests_with(&self, method: Method) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    /// Number of recorded requests with the given method.
    #[must_use]
    pub fn count(&self, method: Method) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    fn answer(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderProfile,
        body: Option<&Value>,
    ) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock();
        state.requests.push(RecordedRequest {
            method,
            url: url.to_owned(),
            headers: headers.clone(),
            body: body.cloned(),
        });

        let reply = match state.routes.get_mut(&(method, url.to_owned())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        drop(state);

        match reply.unwrap_or_else(|| MockReply::status(404)) {
            MockReply::Respond { status, body } => Ok(HttpResponse::new(url, status, body)),
            MockReply::Timeout => Err(TransportError::Timeout {
                url: url.to_owned(),
            }),
            MockReply::Unreachable => Err(TransportError::Unreachable {
                url: url.to_owned(),
                reason: "connection refused".to_owned(),
            }),
        }
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &str, headers: &HeaderProfile) -> Result<HttpResponse, TransportError> {
        self.answer(Method::Get, url, headers, None)
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderProfile,
        body: &Value,
    ) -> Result<HttpResponse, TransportError> {
        self.answer(Method::Post, url, headers, Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unscripted_url_is_404() {
        let transport = MockTransport::new();
        let response = transport.get("https://x/y", &HeaderProfile::new()).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_queue_pops_until_last_reply() {
        let transport = MockTransport::new()
            .on_post("https://x/create", MockReply::json(200, &json!({ "id": "a" })))
            .on_post("https://x/create", MockReply::json(200, &json!({ "id": "b" })));
        let body = json!({});
        let headers = HeaderProfile::new();

        let first = transport.post_json("https://x/create", &headers, &body).await.unwrap();
        let second = transport.post_json("https://x/create", &headers, &body).await.unwrap();
        let third = transport.post_json("https://x/create", &headers, &body).await.unwrap();

        assert!(first.body.contains("\"a\""));
        assert!(second.body.contains("\"b\""));
        assert!(third.body.contains("\"b\""));
        assert_eq!(transport.count(Method::Post), 3);
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let transport = MockTransport::new()
            .on_get("https://x/slow", MockReply::Timeout)
            .on_get("https://x/down", MockReply::Unreachable);
        let headers = HeaderProfile::new();

        assert!(matches!(
            transport.get("https://x/slow", &headers).await,
            Err(TransportError::Timeout { .. })
        ));
        assert!(matches!(
            transport.get("https://x/down", &headers).await,
            Err(TransportError::Unreachable { .. })
        ));
    }

    #[tokio::test]
    async fn test_records_headers_and_body() {
        let transport = MockTransport::new();
        let headers = HeaderProfile::new().with("source-id", "loc");
        let _ = transport
            .post_json("https://x/write", &headers, &json!({ "k": 1 }))
            .await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].headers.get("source-id"), Some("loc"));
        assert_eq!(requests[0].body, Some(json!({ "k": 1 })));
    }
}
