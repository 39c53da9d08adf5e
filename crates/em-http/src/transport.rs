//! The [`Transport`] seam and its `reqwest` implementation.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use em_core::HttpConfig;
use serde_json::Value;
use tracing::trace;

use crate::error::TransportError;
use crate::headers::HeaderProfile;
use crate::response::HttpResponse;

/// HTTP method of a request, as recorded by transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// Issues HTTP requests on behalf of the pipeline.
///
/// Implementations buffer the whole response body. A non-2xx status is
/// returned as a normal [`HttpResponse`]; only failures that prevent a status
/// from being observed are errors.
pub trait Transport: Send + Sync {
    /// Sends a GET request with the given headers.
    fn get(
        &self,
        url: &str,
        headers: &HeaderProfile,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;

    /// Sends a POST request with a JSON body.
    fn post_json(
        &self,
        url: &str,
        headers: &HeaderProfile,
        body: &Value,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a client with the configured timeout and user agent.
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
        headers: &HeaderProfile,
    ) -> Result<HttpResponse, TransportError> {
        let request = headers
            .iter()
            .fold(request, |request, (name, value)| request.header(name, value));

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        trace!(url, status, bytes = body.len(), "response received");
        Ok(HttpResponse::new(url, status, body))
    }
}

impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &HeaderProfile) -> Result<HttpResponse, TransportError> {
        self.send(url, self.client.get(url), headers).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &HeaderProfile,
        body: &Value,
    ) -> Result<HttpResponse, TransportError> {
        self.send(url, self.client.post(url).json(body), headers)
            .await
    }
}
