//! HTTP transport to the booking backend

use super::types::{BookingState, ChatReply, ChatRequest};
use super::{Transport, TransportError};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

const CHAT_PATH: &str = "/api/chat/";
const BOOKING_STATE_PATH: &str = "/api/booking-state/";

/// Talks JSON to the backend's chat and booking-state endpoints
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    chat_url: String,
    booking_state_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::unknown(format!("Failed to create HTTP client: {e}")))?;

        let base = config.api_url.trim_end_matches('/');
        Ok(Self {
            client,
            chat_url: format!("{base}{CHAT_PATH}"),
            booking_state_url: format!("{base}{BOOKING_STATE_PATH}"),
        })
    }

    /// Current state of the session's pending booking on the backend
    pub async fn booking_state(&self, session_id: &str) -> Result<BookingState, TransportError> {
        let response = self
            .client
            .get(&self.booking_state_url)
            .query(&[("session_id", session_id)])
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::network(format!("Failed to read response: {e}")))?;

    if !status.is_success() {
        return Err(TransportError::from_status(status, &body));
    }

    parse_body(&body)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| {
        TransportError::invalid_response(format!("Failed to parse response: {e} - body: {body}"))
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let response = self
            .client
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        read_json(response).await
    }

    fn endpoint(&self) -> &str {
        &self.chat_url
    }
}
