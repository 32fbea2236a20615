//! The immutable request builder

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::Method;
use serde::Serialize;
use turbohttp_transport::{
    HttpTransport, MockReply, MockTransport, Proxy, RequestBody, Transport, TransportRequest,
};

use crate::{
    config::{HeaderValues, HttpConfig, QueryParams},
    error::{Error, Result},
    form,
    observability::{RequestMetadata, RequestTimer, ResponseMetadata},
    response::HttpResponse,
};

/// Immutable HTTP request builder.
///
/// Configure headers, timeouts, proxies and query parameters once, then issue
/// requests. Every `with_*` method returns a new `Http` and leaves the
/// receiver untouched, so a configured builder can be shared and specialised
/// freely.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use turbohttp::Http;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = Http::new()
///     .with_header("Accept", "application/json")
///     .with_timeout(Duration::from_secs(10), Duration::from_secs(2));
///
/// let created = api
///     .post_json("https://example.com/items", &serde_json::json!({"name": "widget"}))
///     .await?;
/// println!("{}", created.status_code());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Http {
    transport: Arc<dyn Transport>,
    config: HttpConfig,
}

impl Http {
    /// Create a builder backed by the reqwest transport with default settings.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }

    /// Create a builder over any transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::from_parts(Arc::new(transport), HttpConfig::default())
    }

    /// Create a builder from a transport handle and a configuration.
    pub fn from_parts(transport: Arc<dyn Transport>, config: HttpConfig) -> Self {
        Self { transport, config }
    }

    /// Create a builder with the reqwest transport and the given configuration.
    pub fn from_config(config: HttpConfig) -> Self {
        Self::from_parts(Arc::new(HttpTransport::new()), config)
    }

    /// Create a builder configured from `TURBOHTTP_*` environment variables.
    ///
    /// See [`HttpConfig::from_env`].
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        Self::from_config(HttpConfig::from_env())
    }

    /// Create a builder answering from canned replies instead of the network.
    ///
    /// Replies are consumed in order; a request beyond the last one fails with
    /// [`TransportError::Exhausted`](turbohttp_transport::TransportError::Exhausted).
    pub fn mock<I, R>(replies: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<MockReply>,
    {
        Self::with_transport(MockTransport::new(replies))
    }

    /// The configuration requests are issued with.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the network call fails or times out.
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.send(Method::GET, url, None).await
    }

    /// Issue a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the network call fails or times out.
    pub async fn delete(&self, url: &str) -> Result<HttpResponse> {
        self.send(Method::DELETE, url, None).await
    }

    /// POST `data` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `data` cannot be serialized, or
    /// [`Error::Transport`] when the network call fails.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<HttpResponse> {
        self.send_json(Method::POST, url, data).await
    }

    /// PUT `data` as a JSON body.
    ///
    /// # Errors
    ///
    /// See [`post_json`](Self::post_json).
    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<HttpResponse> {
        self.send_json(Method::PUT, url, data).await
    }

    /// PATCH `data` as a JSON body.
    ///
    /// # Errors
    ///
    /// See [`post_json`](Self::post_json).
    pub async fn patch_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<HttpResponse> {
        self.send_json(Method::PATCH, url, data).await
    }

    /// POST `data` as an `application/x-www-form-urlencoded` body.
    ///
    /// `data` must serialize to a mapping; nested lists and mappings use
    /// bracketed keys (`tags[0]=a`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `data` is not a mapping, or
    /// [`Error::Transport`] when the network call fails.
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<HttpResponse> {
        self.send_form(Method::POST, url, data).await
    }

    /// PUT `data` as an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// See [`post_form`](Self::post_form).
    pub async fn put_form<T: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &T,
    ) -> Result<HttpResponse> {
        self.send_form(Method::PUT, url, data).await
    }

    /// Return a copy that sends header `name`, replacing any previous value.
    ///
    /// `value` is a single string or a sequence of strings; every value of a
    /// sequence is sent.
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<HeaderValues>) -> Self {
        let mut http = self.clone();
        http.config.set_header(name, value);
        http
    }

    /// Return a copy with new request and connect timeouts.
    ///
    /// `Duration::ZERO` waits indefinitely.
    pub fn with_timeout(&self, request_timeout: Duration, connect_timeout: Duration) -> Self {
        let mut http = self.clone();
        http.config.request_timeout = request_timeout;
        http.config.connect_timeout = connect_timeout;
        http
    }

    /// Return a copy that routes every request through `proxy`.
    pub fn with_single_proxy(&self, proxy: impl Into<String>) -> Self {
        let mut http = self.clone();
        http.config.proxy = Some(Proxy::Single(proxy.into()));
        http
    }

    /// Return a copy that uses `http_proxy` for `http://` targets and
    /// `https_proxy` for `https://` targets, except for `no_proxy` domains.
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
        let mut http = self.clone();
        http.config.proxy = Some(Proxy::PerScheme {
            http: http_proxy.into(),
            https: https_proxy.into(),
            no: no_proxy.into_iter().map(Into::into).collect(),
        });
        http
    }

    /// Return a copy with new query parameters.
    ///
    /// Accepts a raw query string (`"foo=bar"`) or a mapping. They replace
    /// any query string already present in request URLs.
    pub fn with_query_params(&self, params: impl Into<QueryParams>) -> Self {
        let mut http = self.clone();
        http.config.query_params = Some(params.into());
        http
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        data: &T,
    ) -> Result<HttpResponse> {
        let body = serde_json::to_vec(data).map_err(|e| Error::Encode(e.to_string()))?;
        self.send(method, url, Some(RequestBody::Json(body.into()))).await
    }

    async fn send_form<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        data: &T,
    ) -> Result<HttpResponse> {
        let body = form::encode(data)?;
        self.send(method, url, Some(RequestBody::Form(body))).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<RequestBody>,
    ) -> Result<HttpResponse> {
        let mut metadata = RequestMetadata::new(method.as_str(), url);
        if let Some(body) = &body {
            metadata = metadata.with_body_size(body.len());
        }

        let request = TransportRequest {
            method,
            url: url.to_string(),
            headers: self.config.header_pairs(),
            body,
            options: self.config.request_options()?,
        };

        metadata.log_request();
        let timer = RequestTimer::start();

        match self.transport.send(request).await {
            Ok(response) => {
                ResponseMetadata::new(response.status().as_u16(), timer.elapsed())
                    .with_body_size(response.body().len())
                    .log_completed(&metadata);
                Ok(HttpResponse::new(response))
            }
            Err(err) => {
                metadata.log_error(&err.to_string(), timer.elapsed());
                Err(err.into())
            }
        }
    }
}

impl Default for Http {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Http {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Http")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
