//! Error types for turbohttp
//!
//! Failures of the network call come from the transport and are wrapped
//! without modification. Server error statuses are not errors: a 404 or 500
//! is an ordinary [`HttpResponse`](crate::HttpResponse).

use thiserror::Error;
use turbohttp_transport::TransportError;

/// Result type alias for operations that can fail with a turbohttp error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for turbohttp.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed: connection refused, timeout, invalid request, ...
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body is not valid JSON (or not the requested shape).
    #[error("Failed to decode response body as JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body or query mapping could not be encoded.
    #[error("Failed to encode request data: {0}")]
    Encode(String),
}

impl Error {
    /// Whether this error was raised by the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Whether this error came from decoding a response body.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// Whether the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }

    /// The underlying transport error, if any.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_is_transparent() {
        let err: Error = TransportError::Connection("refused".into()).into();
        assert!(err.is_transport());
        assert!(!err.is_decode());
        assert_eq!(err.to_string(), "Connection error: refused");
        assert!(matches!(
            err.as_transport(),
            Some(TransportError::Connection(_))
        ));
    }

    #[test]
    fn test_timeout_detection() {
        let err: Error = TransportError::Timeout.into();
        assert!(err.is_timeout());
        assert!(!Error::Encode("x".into()).is_timeout());
    }

    #[test]
    fn test_decode_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("foobar").unwrap_err();
        let err = Error::Decode(json_err);
        assert!(err.is_decode());
        assert!(err.as_transport().is_none());
        assert!(err.to_string().starts_with("Failed to decode response body as JSON"));
    }
}
