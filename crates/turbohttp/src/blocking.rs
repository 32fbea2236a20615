//! Blocking facade over [`Http`](crate::Http)
//!
//! Each request blocks the calling thread until the response arrives or a
//! timeout elapses. Requests run on a private current-thread tokio runtime,
//! so this type must not be used from within an async runtime.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::{Builder, Runtime};
use turbohttp_transport::{MockReply, Transport, TransportError};

use crate::{
    config::{HeaderValues, HttpConfig, QueryParams},
    error::Result,
    response::HttpResponse,
};

/// Blocking immutable HTTP request builder.
///
/// Same configuration methods and request methods as [`crate::Http`], without
/// `async`. Copies made by `with_*` share the runtime but nothing mutable.
///
/// # Example
///
/// ```rust,no_run
/// use turbohttp::blocking::Http;
///
/// # fn example() -> Result<(), turbohttp::Error> {
/// let http = Http::new()?.with_query_params("page=2");
/// let response = http.get("https://example.com/items")?;
/// println!("{}", response.body_as_string());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Http {
    inner: crate::Http,
    runtime: Arc<Runtime>,
}

impl Http {
    /// Create a blocking builder backed by the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) if the runtime
    /// cannot be started.
    pub fn new() -> Result<Self> {
        Self::from_async(crate::Http::new())
    }

    /// Create a blocking builder over any transport.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_transport(transport: impl Transport + 'static) -> Result<Self> {
        Self::from_async(crate::Http::with_transport(transport))
    }

    /// Create a blocking builder answering from canned replies.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn mock<I, R>(replies: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<MockReply>,
    {
        Self::from_async(crate::Http::mock(replies))
    }

    /// Wrap an async builder, keeping its transport and configuration.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn from_async(inner: crate::Http) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::Io)?;

        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    /// The async builder this facade drives.
    pub fn as_async(&self) -> &crate::Http {
        &self.inner
    }

    /// The configuration requests are issued with.
    pub fn config(&self) -> &HttpConfig {
        self.inner.config()
    }

    /// Issue a GET request. See [`crate::Http::get`].
    pub fn get(&self, url: &str) -> Result<HttpResponse> {
        self.runtime.block_on(self.inner.get(url))
    }

    /// Issue a DELETE request. See [`crate::Http::delete`].
    pub fn delete(&self, url: &str) -> Result<HttpResponse> {
        self.runtime.block_on(self.inner.delete(url))
    }

    /// POST `data` as JSON. See [`crate::Http::post_json`].
    pub fn post_json<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Result<HttpResponse> {
        self.runtime.block_on(self.inner.post_json(url, data))
    }

    /// PUT `data` as JSON. See [`crate::Http::put_json`].
    pub fn put_json<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Result<HttpResponse> {
        self.runtime.block_on(self.inner.put_json(url, data))
    }

    /// PATCH `data` as JSON. See [`crate::Http::patch_json`].
    pub fn patch_json<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Result<HttpResponse> {
        self.runtime.block_on(self.inner.patch_json(url, data))
    }

    /// POST `data` as a form. See [`crate::Http::post_form`].
    pub fn post_form<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Result<HttpResponse> {
        self.runtime.block_on(self.inner.post_form(url, data))
    }

    /// PUT `data` as a form. See [`crate::Http::put_form`].
    pub fn put_form<T: Serialize + ?Sized>(&self, url: &str, data: &T) -> Result<HttpResponse> {
        self.runtime.block_on(self.inner.put_form(url, data))
    }

    /// See [`crate::Http::with_header`].
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<HeaderValues>) -> Self {
        self.wrap(self.inner.with_header(name, value))
    }

    /// See [`crate::Http::with_timeout`].
    pub fn with_timeout(&self, request_timeout: Duration, connect_timeout: Duration) -> Self {
        self.wrap(self.inner.with_timeout(request_timeout, connect_timeout))
    }

    /// See [`crate::Http::with_single_proxy`].
    pub fn with_single_proxy(&self, proxy: impl Into<String>) -> Self {
        self.wrap(self.inner.with_single_proxy(proxy))
    }

    /// See [`crate::Http::with_multiple_proxies`].
    pub fn with_multiple_proxies<I, S>(
        &self,
        http_proxy: impl Into<String>,
        https_proxy: impl Into<String>,
        no_proxy: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wrap(self.inner.with_multiple_proxies(http_proxy, https_proxy, no_proxy))
    }

    /// See [`crate::Http::with_query_params`].
    pub fn with_query_params(&self, params: impl Into<QueryParams>) -> Self {
        self.wrap(self.inner.with_query_params(params))
    }

    fn wrap(&self, inner: crate::Http) -> Self {
        Self {
            inner,
            runtime: Arc::clone(&self.runtime),
        }
    }
}
