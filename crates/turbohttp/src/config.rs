//! Configuration carried by an [`Http`](crate::Http) builder

use serde_json::Value;
use std::time::Duration;
use turbohttp_transport::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, Proxy, RequestOptions,
};

use crate::error::Result;
use crate::form;

/// One or more values for a header.
///
/// Converts from a single string or from an ordered sequence of strings; every
/// value is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderValues(Vec<String>);

impl HeaderValues {
    /// The values in send order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<Vec<&str>> for HeaderValues {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HeaderValues {
    fn from(values: [&str; N]) -> Self {
        Self(values.into_iter().map(String::from).collect())
    }
}

/// Query parameters, either pre-encoded or as a mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParams {
    /// A query string used verbatim, e.g. `foo=bar`
    Raw(String),

    /// A mapping encoded like a form body
    Map(Value),
}

impl QueryParams {
    /// The encoded query string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`](crate::Error::Encode) when a mapping holds a
    /// bare scalar.
    pub fn encode(&self) -> Result<String> {
        match self {
            Self::Raw(query) => Ok(query.clone()),
            Self::Map(map) => form::encode_value(map),
        }
    }
}

impl From<&str> for QueryParams {
    fn from(query: &str) -> Self {
        Self::Raw(query.to_string())
    }
}

impl From<String> for QueryParams {
    fn from(query: String) -> Self {
        Self::Raw(query)
    }
}

impl From<Value> for QueryParams {
    fn from(map: Value) -> Self {
        Self::Map(map)
    }
}

impl<K, V> From<Vec<(K, V)>> for QueryParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::Map(Value::Object(
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::Map(Value::Object(
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }
}

/// Request configuration shared by every request an `Http` issues.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    /// Headers in insertion order; names are unique ignoring ASCII case
    pub headers: Vec<(String, HeaderValues)>,

    /// Time to wait for the response. `Duration::ZERO` waits indefinitely.
    pub request_timeout: Duration,

    /// Time to wait while connecting. `Duration::ZERO` waits indefinitely.
    pub connect_timeout: Duration,

    /// Proxy routing
    pub proxy: Option<Proxy>,

    /// Query parameters replacing the URL's own query string
    pub query_params: Option<QueryParams>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT, // 5 seconds
            connect_timeout: DEFAULT_CONNECT_TIMEOUT, // 3 seconds
            proxy: None,
            query_params: None,
        }
    }
}

impl HttpConfig {
    /// Add a header, replacing any header of the same name.
    pub fn set_header(&mut self, name: impl Into<String>, values: impl Into<HeaderValues>) {
        let name = name.into();
        let values = values.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => *slot = (name, values),
            None => self.headers.push((name, values)),
        }
    }

    /// Values configured for a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&HeaderValues> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, values)| values)
    }

    /// Headers flattened to one `(name, value)` pair per value.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.clone(), v.to_string())))
            .collect()
    }

    /// Transport options for a request issued with this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`](crate::Error::Encode) if the query mapping
    /// cannot be encoded.
    pub fn request_options(&self) -> Result<RequestOptions> {
        Ok(RequestOptions {
            timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            proxy: self.proxy.clone(),
            query: self.query_params.as_ref().map(QueryParams::encode).transpose()?,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first if present. This will look for:
    /// - `TURBOHTTP_TIMEOUT` for the request timeout (in seconds, fractional allowed)
    /// - `TURBOHTTP_CONNECT_TIMEOUT` for the connect timeout (in seconds)
    /// - `TURBOHTTP_PROXY` for a single proxy URL
    ///
    /// Values that do not parse are ignored and logged.
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        use std::env;

        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Ok(raw) = env::var("TURBOHTTP_TIMEOUT") {
            match parse_seconds(&raw) {
                Some(timeout) => config.request_timeout = timeout,
                None => tracing::warn!(value = %raw, "Ignoring invalid TURBOHTTP_TIMEOUT"),
            }
        }

        if let Ok(raw) = env::var("TURBOHTTP_CONNECT_TIMEOUT") {
            match parse_seconds(&raw) {
                Some(timeout) => config.connect_timeout = timeout,
                None => tracing::warn!(value = %raw, "Ignoring invalid TURBOHTTP_CONNECT_TIMEOUT"),
            }
        }

        if let Ok(proxy) = env::var("TURBOHTTP_PROXY")
            && !proxy.trim().is_empty()
        {
            config.proxy = Some(Proxy::Single(proxy));
        }

        config
    }
}

#[cfg(feature = "env")]
fn parse_seconds(raw: &str) -> Option<Duration> {
    let secs = raw.trim().parse::<f64>().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
