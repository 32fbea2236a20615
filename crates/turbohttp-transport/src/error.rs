//! Transport error types

use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur in transport operations
///
/// These are raised by a [`Transport`](crate::Transport) and handed to the
/// caller unchanged; nothing in this workspace retries on them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP protocol level failure (malformed response, body read failure, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Could not establish a connection to the server or the proxy
    #[error("Connection error: {0}")]
    Connection(String),

    /// The connect or request timeout elapsed
    #[error("Timeout")]
    Timeout,

    /// The request could not be built (bad URL, header, method or proxy)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mock transport ran out of queued replies
    #[error("Mock transport has no reply queued for {method} {url}")]
    Exhausted {
        /// Method of the unanswered request
        method: String,
        /// URL of the unanswered request
        url: String,
    },

    /// Generic transport error
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Whether this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Whether this error is a connection failure
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<http::Error> for TransportError {
    fn from(err: http::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidRequest(format!("invalid URL: {}", err))
    }
}
