use tracing::debug;

use crate::api::{BookingClient, DialogueClient};
use crate::conversation::{Conversation, Submission};

/// What happened to one submitted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Ignored,
    Busy,
    Answered,
    ChatCompleted,
    BookingCompleted,
}

/// Drives a [`Conversation`] against a remote API, one input at a time.
pub struct ChatService<A> {
    api: A,
    conversation: Conversation,
}

impl<A> ChatService<A>
where
    A: DialogueClient + BookingClient,
{
    pub fn new(api: A, conversation: Conversation) -> Self {
        Self { api, conversation }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn start_booking(&mut self) -> bool {
        self.conversation.start_booking()
    }

    /// Runs `input` through the state machine, performing and completing any
    /// request it produces before returning.
    pub async fn submit(&mut self, input: &str) -> Submitted {
        match self.conversation.submit(input) {
            Submission::Ignored => Submitted::Ignored,
            Submission::Busy => Submitted::Busy,
            Submission::Answered => Submitted::Answered,
            Submission::Chat(pending) => {
                let outcome = self.api.send_chat(&pending.request).await;
                self.conversation.complete_chat(pending.ticket, outcome);
                Submitted::ChatCompleted
            }
            Submission::Booking(pending) => {
                let outcome = self.api.submit_booking(&pending.request).await;
                debug!(ok = outcome.is_ok(), "booking submission finished");
                self.conversation.complete_booking(pending.ticket, outcome);
                Submitted::BookingCompleted
            }
        }
    }
}
