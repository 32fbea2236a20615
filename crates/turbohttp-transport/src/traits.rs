//! Transport trait and request types
//!
//! Defines the generic Transport trait and the request description every
//! transport receives: method, URL, headers, an optional pre-encoded body and
//! the per-request options (timeouts, proxy, query string).

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default time to wait for a complete response
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time to wait while establishing a connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Proxy routing for a request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Proxy {
    /// Route every request through one proxy
    Single(String),

    /// One proxy per target scheme, bypassed for the listed domains
    PerScheme {
        /// Proxy used for `http://` targets
        http: String,
        /// Proxy used for `https://` targets
        https: String,
        /// Domains that are never proxied
        no: Vec<String>,
    },
}

/// Per-request options merged in by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// Total time to wait for the response. `Duration::ZERO` waits indefinitely.
    pub timeout: Duration,

    /// Time to wait while connecting. `Duration::ZERO` waits indefinitely.
    pub connect_timeout: Duration,

    /// Proxy routing, `None` leaves the transport default in place
    pub proxy: Option<Proxy>,

    /// Encoded query string replacing the one in the URL, if any
    pub query: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            proxy: None,
            query: None,
        }
    }
}

/// Encoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A serialized JSON document
    Json(Bytes),

    /// An `application/x-www-form-urlencoded` string
    Form(String),
}

impl RequestBody {
    /// Content type the transport attaches when the caller set none
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    /// Body bytes as sent on the wire
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Self::Json(bytes) => bytes.clone(),
            Self::Form(form) => Bytes::from(form.clone()),
        }
    }

    /// Body length in bytes
    pub fn len(&self) -> usize {
        match self {
            Self::Json(bytes) => bytes.len(),
            Self::Form(form) => form.len(),
        }
    }

    /// Whether the body is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transport-agnostic description of one request
///
/// Represents an HTTP request to be sent via the Transport. Header names and
/// values are kept as plain strings and validated when the request is built,
/// so a repeated name carries several values for the same header.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,

    /// Request URL
    pub url: String,

    /// Request headers, in send order
    pub headers: Vec<(String, String)>,

    /// Request body (optional)
    pub body: Option<RequestBody>,

    /// Timeouts, proxy and query string
    pub options: RequestOptions,
}

impl TransportRequest {
    /// Create a new request with default options
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            options: RequestOptions::default(),
        }
    }

    /// Append a header value
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace the request options
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// All values sent for a header (case-insensitive)
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// The target URL with the query option applied
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] if the URL cannot be parsed.
    pub fn uri(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)?;
        if let Some(query) = &self.options.query {
            url.set_query(if query.is_empty() { None } else { Some(query) });
        }
        Ok(url)
    }

    /// Build the `http::Request` this request describes
    ///
    /// Adds the body's content type unless a `Content-Type` header was given.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] for an invalid URL, header
    /// name or header value.
    pub fn to_http_request(&self) -> Result<http::Request<Bytes>> {
        let uri: http::Uri = self
            .uri()?
            .as_str()
            .parse()
            .map_err(|e: http::uri::InvalidUri| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = http::Request::builder()
            .method(self.method.clone())
            .uri(uri);

        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &self.body
            && self.header_values(CONTENT_TYPE.as_str()).is_empty()
        {
            builder = builder.header(CONTENT_TYPE, body.content_type());
        }

        let body = self.body.as_ref().map(RequestBody::to_bytes).unwrap_or_default();
        Ok(builder.body(body)?)
    }
}

/// Generic transport trait
///
/// A transport executes one request and returns the complete response, or a
/// [`TransportError`] when the network call fails or times out. HTTP error
/// statuses are ordinary responses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and receive the buffered response
    async fn send(&self, request: TransportRequest) -> Result<http::Response<Bytes>>;
}
