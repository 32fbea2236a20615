//! Shared helpers for turbohttp integration tests

#![allow(dead_code)]

use bytes::Bytes;
use turbohttp::MockReply;

/// A canned response with one header and a body.
pub fn response_with_header(
    status: u16,
    name: &str,
    value: &str,
    body: &'static str,
) -> http::Response<Bytes> {
    http::Response::builder()
        .status(status)
        .header(name, value)
        .body(Bytes::from_static(body.as_bytes()))
        .expect("valid test response")
}

/// A reply echoing the request body, with the request's `Content-Type`
/// reported back in `X-Encoding`.
pub fn echo_body() -> MockReply {
    MockReply::handler(|request, _options| {
        let encoding = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| http::HeaderValue::from_static(""));
        http::Response::builder()
            .status(200)
            .header("X-Encoding", encoding)
            .body(request.into_body())
            .expect("valid echo response")
    })
}
