//! HTTP transport client implementation
//!
//! Implements the Transport trait on top of reqwest. Connect timeout and
//! proxy routing are client-level settings in reqwest, so one client is built
//! per distinct pair and reused for every request that asks for it. The cache
//! is bounded by [`HttpTransportConfig::max_cached_clients`].

use crate::error::Result;
use crate::traits::{Proxy, RequestOptions, Transport, TransportRequest};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Per-request total timeout
/// - Connect timeout and proxy routing through cached clients
/// - Connection pooling (per cached client, managed by reqwest)
#[derive(Clone)]
pub struct HttpTransport {
    clients: Arc<Mutex<HashMap<ClientKey, ReqwestClient>>>,
    config: HttpTransportConfig,
}

/// Client-level settings that select a cached reqwest client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    connect_timeout: Duration,
    proxy: Option<Proxy>,
}

impl ClientKey {
    fn from_options(options: &RequestOptions) -> Self {
        Self {
            connect_timeout: options.connect_timeout,
            proxy: options.proxy.clone(),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Get the transport configuration
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    /// Number of reqwest clients built so far
    pub async fn cached_clients(&self) -> usize {
        self.clients.lock().await.len()
    }

    async fn client_for(&self, options: &RequestOptions) -> Result<ReqwestClient> {
        let key = ClientKey::from_options(options);
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        let client = self.build_client(&key)?;
        if clients.len() >= self.config.max_cached_clients.max(1) {
            // Clients already handed out stay usable; only the cache forgets them
            debug!(cached = clients.len(), "Client cache full, clearing");
            clients.clear();
        }
        clients.insert(key, client.clone());
        Ok(client)
    }

    fn build_client(&self, key: &ClientKey) -> Result<ReqwestClient> {
        debug!(
            connect_timeout_ms = key.connect_timeout.as_millis(),
            proxy = ?key.proxy,
            "Building reqwest client"
        );

        let mut builder = ReqwestClient::builder()
            .user_agent(self.config.user_agent.as_str())
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host);

        if !key.connect_timeout.is_zero() {
            builder = builder.connect_timeout(key.connect_timeout);
        }

        builder = match &key.proxy {
            None => builder,
            Some(Proxy::Single(url)) => builder.proxy(reqwest::Proxy::all(url.as_str())?),
            Some(Proxy::PerScheme { http, https, no }) => {
                let no_proxy = reqwest::NoProxy::from_string(&no.join(","));
                builder
                    .proxy(reqwest::Proxy::http(http.as_str())?.no_proxy(no_proxy.clone()))
                    .proxy(reqwest::Proxy::https(https.as_str())?.no_proxy(no_proxy))
            }
        };

        Ok(builder.build()?)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<http::Response<Bytes>> {
        let client = self.client_for(&request.options).await?;

        let mut req = reqwest::Request::try_from(request.to_http_request()?)?;
        *req.timeout_mut() = if request.options.timeout.is_zero() {
            None
        } else {
            Some(request.options.timeout)
        };

        let response = client.execute(req).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let extensions = response.extensions().clone();
        let body = response.bytes().await?;

        debug!(
            method = %request.method,
            status = status.as_u16(),
            body_size = body.len(),
            "Transport received response"
        );

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        *out.extensions_mut() = extensions;
        Ok(out)
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// `User-Agent` sent unless the request sets its own
    pub user_agent: String,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Maximum number of distinct (connect timeout, proxy) clients kept
    ///
    /// When a new combination arrives and the cache is full, the cache is
    /// emptied and rebuilt on demand.
    pub max_cached_clients: usize,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("turbohttp/", env!("CARGO_PKG_VERSION")).to_string(),
            pool_max_idle_per_host: 10,
            max_cached_clients: 16,
        }
    }
}
