//! # turbohttp
//!
//! An immutable request builder over a pluggable HTTP transport.
//!
//! Configure headers, timeouts, proxies and query parameters once, then issue
//! GET/DELETE requests or POST/PUT/PATCH requests with JSON or form bodies,
//! and decode JSON responses. Connection handling, TLS and redirects belong to
//! the transport (reqwest by default).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use turbohttp::Http;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let http = Http::new().with_header("Accept", "application/json");
//!
//!     let response = http
//!         .with_query_params([("q", "rust")])
//!         .get("https://example.com/search")
//!         .await?;
//!
//!     println!("{}", response.data()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! [`Http::mock`] answers from canned replies. A handler reply receives the
//! request that would have been sent:
//!
//! ```rust
//! use bytes::Bytes;
//! use turbohttp::{Http, MockReply};
//!
//! # tokio_test::block_on(async {
//! let http = Http::mock([MockReply::handler(|request, _options| {
//!     http::Response::new(Bytes::from(request.uri().to_string()))
//! })]);
//!
//! let response = http.with_query_params("a=1").get("https://example.com/").await.unwrap();
//! assert_eq!(response.body_as_string(), "https://example.com/?a=1");
//! # });
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::Http;
pub use config::{HeaderValues, HttpConfig, QueryParams};
pub use error::{Error, Result};
pub use response::HttpResponse;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod observability;
pub mod response;

// Optional blocking client
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;

// Re-export the transport layer for custom transports and tests
pub use turbohttp_transport as transport;
pub use turbohttp_transport::{
    HttpTransport, MockReply, MockTransport, Proxy, RequestOptions, Transport, TransportError,
    TransportRequest,
};

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
