//! Backend dialogue transport
//!
//! The backend is an opaque request/response service: one user message in,
//! one assistant reply out.

mod error;
mod http;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::TransportError;
pub use http::HttpTransport;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Request/response channel to the dialogue backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one user message for `request.session_id` and wait for the reply
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError>;

    /// Where requests go, for logging
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        (**self).send(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for transports
pub struct LoggingTransport {
    inner: Arc<dyn Transport>,
    endpoint: String,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        let endpoint = inner.endpoint().to_string();
        Self { inner, endpoint }
    }
}

#[async_trait]
impl Transport for LoggingTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    session_id = %request.session_id,
                    duration_ms = %duration.as_millis(),
                    reply_len = reply.message.len(),
                    booking_created = reply.booking_created,
                    "Chat request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.endpoint,
                    session_id = %request.session_id,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.label(),
                    error = %e.message,
                    "Chat request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
