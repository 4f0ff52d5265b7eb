//! Mock API for testing without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BookingClient, DialogueClient};
use crate::errors::ClientError;
use crate::models::{BookingRequest, ChatRequest};

/// Replays queued outcomes and records every request it receives.
#[derive(Default)]
pub struct MockApi {
    replies: Mutex<VecDeque<Result<String, ClientError>>>,
    bookings: Mutex<VecDeque<Result<(), ClientError>>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub booking_requests: Mutex<Vec<BookingRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn queue_chat_error(&self, error: ClientError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn queue_booking(&self, outcome: Result<(), ClientError>) {
        self.bookings.lock().unwrap().push_back(outcome);
    }

    pub fn recorded_chats(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    pub fn recorded_bookings(&self) -> Vec<BookingRequest> {
        self.booking_requests.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl DialogueClient for MockApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<String, ClientError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network("No mock reply queued")))
    }
}

#[async_trait(?Send)]
impl BookingClient for MockApi {
    async fn submit_booking(&self, request: &BookingRequest) -> Result<(), ClientError> {
        self.booking_requests.lock().unwrap().push(request.clone());
        self.bookings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network("No mock booking outcome queued")))
    }
}
