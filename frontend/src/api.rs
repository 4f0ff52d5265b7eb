use async_trait::async_trait;
use gloo_net::http::Request;

use vet_chat::api::{endpoint, BookingClient, DialogueClient, APPOINTMENTS_PATH, CHAT_PATH};
use vet_chat::config::DEFAULT_API_BASE_URL;
use vet_chat::models::{BookingRequest, ChatRequest, ChatResponse};
use vet_chat::ClientError;

/// Base URL of the chat backend, fixed at build time.
const API_BASE: &str = match option_env!("VET_CHAT_API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

/// Browser `fetch` client for the chat and appointment endpoints.
#[derive(Clone, Copy, Debug)]
pub struct GlooApi {
    base_url: &'static str,
}

impl Default for GlooApi {
    fn default() -> Self {
        Self { base_url: API_BASE }
    }
}

#[async_trait(?Send)]
impl DialogueClient for GlooApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<String, ClientError> {
        let resp = Request::post(&endpoint(self.base_url, CHAT_PATH))
            .json(request)
            .map_err(|e| ClientError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        // Like the native client, any JSON body is an answer regardless of status.
        resp.json::<ChatResponse>()
            .await
            .map(ChatResponse::into_reply)
            .map_err(|e| ClientError::parse(e.to_string()))
    }
}

#[async_trait(?Send)]
impl BookingClient for GlooApi {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<(), ClientError> {
        let resp = Request::post(&endpoint(self.base_url, APPOINTMENTS_PATH))
            .json(request)
            .map_err(|e| ClientError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        if !resp.ok() {
            return Err(ClientError::Status { status: resp.status() });
        }
        Ok(())
    }
}
