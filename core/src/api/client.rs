//! HTTP client for the MarzPay API.

use std::sync::Arc;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result, map_error_response};
use crate::transport::{HttpRequest, Method, ReqwestTransport, Transport};

const USER_AGENT: &str = concat!("marzpay-rust/", env!("CARGO_PKG_VERSION"));

/// MarzPay API client.
///
/// Builds authenticated requests, sends them through a [`Transport`] and
/// decodes the JSON responses. Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client using `reqwest`.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Create a new API client sending requests through `transport`.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Result<Self> {
        if config.api_key().is_empty() || config.api_secret().is_empty() {
            return Err(Error::validation("API key and secret are required"));
        }
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Value of the `Authorization` header.
    fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.config.api_key(), self.config.api_secret());
        format!("Basic {}", BASE64_STANDARD.encode(credentials))
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> HttpRequest {
        let mut headers = vec![
            ("Authorization".to_string(), self.authorization()),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        HttpRequest {
            method,
            url: format!("{}/{}", self.config.base_url(), path.trim_start_matches('/')),
            query,
            headers,
            body,
            timeout: self.config.timeout(),
        }
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-2xx responses are mapped with [`map_error_response`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let request = self.build_request(method, path, query, body);
        let url = request.url.clone();

        log::debug!("{} {}", method, url);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            log::warn!("{} {} failed with status {}", method, url, response.status);
            return Err(map_error_response(response.status, &response.body));
        }

        log::debug!("{} {} response: {}", method, url, response.body);

        // DELETE and some PUT endpoints answer with an empty body.
        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };

        serde_json::from_str(text).map_err(|e| {
            Error::Parse(format!(
                "Failed to parse response: {}. Body: {}",
                e, response.body
            ))
        })
    }

    // Helper methods

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Get, path, Vec::new(), None).await
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        self.request(Method::Get, path, query, None).await
    }

    pub async fn post_json<T: DeserializeOwned, R: Serialize>(
        &self,
        path: &str,
        body: &R,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::Post, path, Vec::new(), Some(body)).await
    }

    pub async fn put_json<T: DeserializeOwned, R: Serialize>(
        &self,
        path: &str,
        body: &R,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::Put, path, Vec::new(), Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::Delete, path, Vec::new(), None).await
    }
}
