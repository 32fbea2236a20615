//! HTTP transport implementation
//!
//! Provides a reqwest-backed client that implements the Transport trait.
//! Connection pooling, TLS and redirects are left to reqwest.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
