use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{endpoint, BookingClient, DialogueClient, APPOINTMENTS_PATH, CHAT_PATH};
use crate::errors::ClientError;
use crate::models::{BookingRequest, ChatRequest, ChatResponse};

/// `reqwest`-backed client for both endpoints. No timeout is configured.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() {
        ClientError::network(format!("Connection failed: {e}"))
    } else {
        ClientError::network(e.to_string())
    }
}

#[async_trait(?Send)]
impl DialogueClient for HttpApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<String, ClientError> {
        let resp = self
            .client
            .post(endpoint(&self.base_url, CHAT_PATH))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        // The status is not inspected: any JSON object body counts as an answer.
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::network(format!("Failed to read response: {e}")))?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::parse(format!("{e} (HTTP {status})")))?;

        debug!(%status, "chat reply received");
        Ok(parsed.into_reply())
    }
}

#[async_trait(?Send)]
impl BookingClient for HttpApi {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<(), ClientError> {
        let resp = self
            .client
            .post(endpoint(&self.base_url, APPOINTMENTS_PATH))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(ClientError::Status { status: resp.status().as_u16() });
        }
        debug!(status = %resp.status(), "appointment accepted");
        Ok(())
    }
}
