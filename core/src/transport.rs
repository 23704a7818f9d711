//! HTTP transport abstraction.
//!
//! The API layer builds fully-formed [`HttpRequest`]s (URL, auth headers,
//! JSON body) and hands them to a [`Transport`]. The transport only moves
//! bytes: it reports every HTTP status as a successful [`HttpResponse`] and
//! fails only when no response was obtained at all (connect failure, timeout).
//!
//! [`ReqwestTransport`] is the production implementation. Tests and callers
//! with special needs (proxies, recording, fixtures) can plug in their own.

use crate::error::{Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Type alias for transport futures.
///
/// On WASM targets, futures don't need to be `Send` since JavaScript is single-threaded.
/// On native targets, futures should be `Send` to allow use with multi-threaded runtimes.
#[cfg(target_arch = "wasm32")]
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse>> + 'a>>;

#[cfg(not(target_arch = "wasm32"))]
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse>> + Send + 'a>>;

/// HTTP methods used by the MarzPay API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL without query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Look up a header value, ignoring ASCII case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status code and body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends [`HttpRequest`]s.
#[cfg(target_arch = "wasm32")]
pub trait Transport {
    /// Send a request and return whatever the server answered.
    ///
    /// Returns `Err` only for connectivity failures.
    fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

#[cfg(not(target_arch = "wasm32"))]
pub trait Transport: Send + Sync {
    /// Send a request and return whatever the server answered.
    ///
    /// Returns `Err` only for connectivity failures.
    fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing `reqwest::Client` (connection pool, proxy settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            builder = builder.timeout(request.timeout);

            let response = builder
                .send()
                .await
                .map_err(|e| connectivity_error(&request.url, e))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| connectivity_error(&request.url, e))?;

            Ok(HttpResponse { status, body })
        })
    }
}

fn connectivity_error(url: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(format!("Request to {} timed out: {}", url, err))
    } else {
        Error::Network(format!("Failed to send request to {}: {}", url, err))
    }
}
