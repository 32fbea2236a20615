//! Transport abstraction layer for turbohttp
//!
//! Provides a trait-based transport abstraction. The convenience client in
//! `turbohttp` describes each request as a [`TransportRequest`] and hands it
//! to whichever transport it was built with.
//!
//! # Architecture
//!
//! - **Transport trait**: Generic interface for any transport implementation
//! - **HTTP transport**: Network client via reqwest
//! - **Mock transport**: Canned replies and request capture for tests
//! - **Error handling**: One error type for every transport failure
//!
//! # Usage
//!
//! ```ignore
//! use turbohttp_transport::{HttpTransport, Transport, TransportRequest};
//! use http::Method;
//!
//! let transport = HttpTransport::new();
//! let request = TransportRequest::new(Method::GET, "https://example.com");
//! let response = transport.send(request).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod mock;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use self::http::{HttpTransport, HttpTransportConfig};
pub use mock::{MockReply, MockTransport};
pub use traits::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, Proxy, RequestBody, RequestOptions,
    Transport, TransportRequest,
};

/// Non-canonical reason phrase, stored in response extensions by the HTTP/1 client
pub use hyper::ext::ReasonPhrase;
