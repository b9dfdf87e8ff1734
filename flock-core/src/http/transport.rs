//! HTTP Transport Trait
//!
//! Platform-agnostic abstraction over HTTP so the request client can be
//! exercised against a mock in tests.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HttpError;

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Uppercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An outbound request.
///
/// `path` is resolved against the configured API base URL unless it is
/// already absolute (the location-lookup API lives on a different host).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Whether a bearer token should be attached before sending.
    pub requires_auth: bool,
    /// Bearer token, filled in by the request client.
    pub bearer: Option<String>,
}

impl HttpRequest {
    fn new(method: Method, path: &str) -> Self {
        HttpRequest {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
            requires_auth: true,
            bearer: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Marks the request as not needing a bearer token (`/auth` endpoints).
    pub fn unauthenticated(mut self) -> Self {
        self.requires_auth = false;
        self
    }
}

/// A received response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with a JSON body (handy for mocks).
    pub fn json_body(status: u16, body: Value) -> Self {
        HttpResponse {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// Creates an empty-bodied response.
    pub fn empty(status: u16) -> Self {
        HttpResponse {
            status,
            body: Vec::new(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> HttpResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// Decodes the body as an untyped JSON value, or Null when empty.
    pub fn value(&self) -> HttpResult<Value> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// Extracts the server's `detail` message from an error body, if any.
    pub fn detail(&self) -> Option<String> {
        let value: Value = serde_json::from_slice(&self.body).ok()?;
        value.get("detail")?.as_str().map(|s| s.to_string())
    }
}

/// Transport trait for HTTP communication.
///
/// This abstracts the underlying HTTP stack so the authenticated request
/// client can be tested against scripted responses. A transport only moves
/// bytes; authentication and retry policy live in
/// [`ApiClient`](super::client::ApiClient).
pub trait HttpTransport: Send + Sync {
    /// Executes a single request and returns the raw response.
    ///
    /// Non-2xx statuses are returned as responses, not errors; only
    /// transport-level failures produce `Err`.
    fn execute(&self, request: &HttpRequest) -> HttpResult<HttpResponse>;
}
