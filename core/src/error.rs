//! Error types for the MarzPay Client SDK.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced an HTTP response (connect failure, timeout).
    Connectivity,
    /// The API answered with a non-2xx status.
    Api,
    /// Local input or a webhook signature was rejected before any I/O.
    Validation,
    /// A response body could not be decoded.
    Decode,
    /// Anything else.
    Other,
}

/// Error reported by the MarzPay API for a non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine readable error code, e.g. `invalid_amount`.
    pub code: String,
    /// HTTP status of the response.
    pub status: u16,
    /// Human readable message.
    pub message: String,
    /// Additional details, such as per-field validation messages.
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {}): {}", self.code, self.status, self.message)
    }
}

/// Errors that can occur in the MarzPay Client SDK.
#[derive(Error, Debug)]
pub enum Error {
    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response from the API.
    #[error("API error: {0}")]
    Api(ApiError),

    /// Local input failed validation.
    #[error("{}", validation_display(.message, .errors))]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    /// Webhook signature did not match the payload.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{0}")]
    Other(String),
}

fn validation_display(message: &str, errors: &[String]) -> String {
    match errors {
        [] => message.to_string(),
        [only] if only == message => message.to_string(),
        _ => format!("{}: {}", message, errors.join(", ")),
    }
}

impl Error {
    /// Build a validation error with a single problem.
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        Error::Validation {
            errors: vec![message.clone()],
            message,
        }
    }

    /// Which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network(_) | Error::Timeout(_) => ErrorKind::Connectivity,
            Error::Api(_) => ErrorKind::Api,
            Error::Validation { .. } | Error::InvalidSignature => ErrorKind::Validation,
            Error::Parse(_) | Error::Serde(_) => ErrorKind::Decode,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// The API error payload, if this is an API error.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "blocking")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(format!("{:#}", err))
    }
}

/// Error body as sent by the API. Fields are loosely typed since the shape
/// differs between endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
    details: Option<serde_json::Value>,
    errors: Option<serde_json::Value>,
}

fn text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn details(value: Option<serde_json::Value>) -> Option<serde_json::Map<String, serde_json::Value>> {
    match value? {
        serde_json::Value::Object(map) => Some(map),
        serde_json::Value::Null => None,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("errors".to_string(), other);
            Some(map)
        }
    }
}

/// Map a non-2xx response to an [`Error::Api`].
///
/// Missing codes become `http_<status>` and missing messages fall back to the
/// status' canonical reason phrase.
pub fn map_error_response(status: u16, body: &str) -> Error {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let code = text(parsed.code)
        .or_else(|| text(parsed.error))
        .unwrap_or_else(|| format!("http_{}", status));

    let message = text(parsed.message).unwrap_or_else(|| {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown error")
            .to_string()
    });

    let details = details(parsed.details).or_else(|| details(parsed.errors));

    Error::Api(ApiError {
        code,
        status,
        message,
        details,
    })
}
