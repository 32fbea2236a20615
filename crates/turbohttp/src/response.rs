//! HTTP response handling

use bytes::{Buf, Bytes};
use http::{HeaderMap, StatusCode, Version};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::io::Read;
use turbohttp_transport::ReasonPhrase;

use crate::error::{Error, Result};

/// Response wrapper with a re-readable body and JSON decoding.
///
/// Wraps one `http::Response<Bytes>`. The body is fully buffered by the
/// transport, so [`body_as_string`](Self::body_as_string) always sees the
/// complete content no matter how many readers were drained before it.
///
/// # Example
///
/// ```rust,no_run
/// # use turbohttp::Http;
/// # async fn example(http: Http) -> Result<(), Box<dyn std::error::Error>> {
/// let response = http.get("https://example.com/api/items").await?;
///
/// if response.is_success() {
///     let items = response.data()?;
///     println!("{} items", items.as_array().map_or(0, Vec::len));
/// } else {
///     println!("{} {}", response.status_code(), response.reason_phrase());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    inner: http::Response<Bytes>,
}

impl HttpResponse {
    /// Wrap a transport response.
    pub fn new(inner: http::Response<Bytes>) -> Self {
        Self { inner }
    }

    /// Get the status code as a number.
    pub fn status_code(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Whether a header is present (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.inner.headers().contains_key(name)
    }

    /// All values of a header, in received order.
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`.
    pub fn header(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.inner
            .headers()
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect()
    }

    /// All values of a header joined with `", "`, or an empty string.
    pub fn header_line(&self, name: &str) -> String {
        self.header(name).join(", ")
    }

    /// Reason phrase sent by the server.
    ///
    /// Falls back to the canonical phrase for the status code when the
    /// server sent the standard one, and to an empty string for unknown codes.
    pub fn reason_phrase(&self) -> Cow<'_, str> {
        match self.inner.extensions().get::<ReasonPhrase>() {
            Some(reason) => String::from_utf8_lossy(reason.as_bytes()),
            None => Cow::Borrowed(self.inner.status().canonical_reason().unwrap_or("")),
        }
    }

    /// HTTP protocol version of the response.
    pub fn protocol_version(&self) -> Version {
        self.inner.version()
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// A forward-only reader positioned at the start of the body.
    ///
    /// Each call returns an independent reader; draining one does not affect
    /// the others or [`body_as_string`](Self::body_as_string).
    pub fn body_reader(&self) -> impl Read + use<> {
        self.inner.body().clone().reader()
    }

    /// The full body as a string. Invalid UTF-8 is replaced with `U+FFFD`.
    pub fn body_as_string(&self) -> String {
        String::from_utf8_lossy(self.inner.body()).into_owned()
    }

    /// Decode the body as a JSON value tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the body is not valid JSON.
    pub fn data(&self) -> Result<Value> {
        self.data_as()
    }

    /// Decode the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the body is not valid JSON or does not
    /// match `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(self.inner.body()).map_err(Error::Decode)
    }

    /// Get a reference to the wrapped response.
    pub fn as_inner(&self) -> &http::Response<Bytes> {
        &self.inner
    }

    /// Consume the wrapper and return the wrapped response.
    pub fn into_inner(self) -> http::Response<Bytes> {
        self.inner
    }
}

impl From<http::Response<Bytes>> for HttpResponse {
    fn from(inner: http::Response<Bytes>) -> Self {
        Self::new(inner)
    }
}
