//! Structured logging for requests issued through [`Http`](crate::Http)
//!
//! Every request is logged through this layer: a `debug!` when it is sent,
//! then `info!` on completion or `warn!` when the transport fails.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Target URL as given by the caller
    pub url: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            url = %self.url,
            body_size = self.body_size,
            "Sending HTTP request"
        );
    }


    /// Log a transport failure
    pub fn log_error(&self, error: &str, elapsed: Duration) {
        warn!(
            method = %self.method,
            url = %self.url,
            elapsed_ms = elapsed.as_millis(),
            error = %error,
            "HTTP request failed"
        );
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log a completed exchange, whatever its status
    pub fn log_completed(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            body_size = self.body_size,
            elapsed_ms = self.elapsed.as_millis(),
            "HTTP request completed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install a `tracing-subscriber` formatter filtered by `RUST_LOG`.
///
/// Defaults to `turbohttp=info` when `RUST_LOG` is unset. Does nothing if a
/// global subscriber is already installed.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("turbohttp=info,turbohttp_transport=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
