//! Mock transport for testing without a network
//!
//! Replays a FIFO of canned replies. A reply is either a ready response, an
//! error, or a handler that receives the constructed request and its options,
//! so tests can assert on exactly what would have been sent.

use crate::error::{Result, TransportError};
use crate::traits::{RequestOptions, Transport, TransportRequest};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Callback producing a response from the request that was sent
pub type MockHandler =
    Box<dyn FnOnce(http::Request<Bytes>, &RequestOptions) -> http::Response<Bytes> + Send>;

/// One queued answer of a [`MockTransport`]
pub enum MockReply {
    /// Return this response as-is
    Response(http::Response<Bytes>),

    /// Build the response from the outgoing request
    Handler(MockHandler),

    /// Fail the request with this error
    Error(TransportError),
}

impl MockReply {
    /// Wrap a closure as a reply
    pub fn handler<F>(f: F) -> Self
    where
        F: FnOnce(http::Request<Bytes>, &RequestOptions) -> http::Response<Bytes> + Send + 'static,
    {
        Self::Handler(Box::new(f))
    }
}

impl fmt::Debug for MockReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response(response) => f.debug_tuple("Response").field(response).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Error(err) => f.debug_tuple("Error").field(err).finish(),
        }
    }
}

impl From<http::Response<Bytes>> for MockReply {
    fn from(response: http::Response<Bytes>) -> Self {
        Self::Response(response)
    }
}

impl From<TransportError> for MockReply {
    fn from(err: TransportError) -> Self {
        Self::Error(err)
    }
}

/// Build a canned response with a status and body
pub fn response(status: u16, body: impl Into<Bytes>) -> http::Response<Bytes> {
    let mut response = http::Response::new(body.into());
    *response.status_mut() =
        http::StatusCode::from_u16(status).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
    response
}

/// A transport that answers from a queue instead of the network
///
/// Clones share the same queue and request log, so a test can keep one
/// handle for assertions while another is owned by the client under test.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl MockTransport {
    /// Create a mock answering with `replies` in order
    pub fn new<I, R>(replies: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<MockReply>,
    {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Into::into).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue another reply
    pub async fn push(&self, reply: impl Into<MockReply>) {
        self.replies.lock().await.push_back(reply.into());
    }

    /// Number of replies not consumed yet
    pub async fn remaining(&self) -> usize {
        self.replies.lock().await.len()
    }

    /// Every request received so far, in order
    pub async fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<http::Response<Bytes>> {
        self.requests.lock().await.push(request.clone());

        // Reject what the network transport would reject, before using a reply
        let built = request.to_http_request()?;
        let reply = self.replies.lock().await.pop_front();
        debug!(
            method = %request.method,
            url = %request.url,
            reply = ?reply,
            "Mock transport answering"
        );

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Handler(handler)) => Ok(handler(built, &request.options)),
            Some(MockReply::Error(err)) => Err(err),
            None => Err(TransportError::Exhausted {
                method: request.method.to_string(),
                url: request.url,
            }),
        }
    }
}
