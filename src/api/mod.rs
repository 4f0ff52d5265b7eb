//! Remote chat and appointment endpoints.

#[cfg(feature = "native")]
pub mod http;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::models::{BookingRequest, ChatRequest};

pub const CHAT_PATH: &str = "/api/chat";
pub const APPOINTMENTS_PATH: &str = "/api/appointments";

/// Joins a base URL and an endpoint path without doubling the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Sends one chat turn and returns the reply text.
///
/// Implementations fall back to [`FALLBACK_REPLY`](crate::models::FALLBACK_REPLY)
/// when the response carries no reply; transport and decode failures are
/// returned as errors for the caller to absorb.
#[async_trait(?Send)]
pub trait DialogueClient {
    async fn send_chat(&self, request: &ChatRequest) -> Result<String, ClientError>;
}

/// Submits a completed appointment. Only success or failure is reported.
#[async_trait(?Send)]
pub trait BookingClient {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(endpoint("http://localhost:5001", CHAT_PATH), "http://localhost:5001/api/chat");
        assert_eq!(
            endpoint("http://localhost:5001/", APPOINTMENTS_PATH),
            "http://localhost:5001/api/appointments"
        );
    }
}
