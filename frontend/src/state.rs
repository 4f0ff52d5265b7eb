use leptos::prelude::*;
use leptos::task::spawn_local;

use vet_chat::{
    AnonymousId, BookingClient, Conversation, DialogueClient, HistoryWindow, Session, Submission,
};

use crate::api::GlooApi;

/// Widget state, provided via Leptos context.
///
/// The whole conversation lives in one signal; every transition goes through
/// the state machine, and network completions are applied with `try_update`
/// so that replies arriving after the widget was torn down are dropped.
#[derive(Clone, Copy)]
pub struct WidgetState {
    pub conversation: RwSignal<Conversation>,
    api: GlooApi,
}

impl WidgetState {
    /// Create a new `WidgetState` for `session` and provide it in the current context.
    pub fn provide(session: &Session, anonymous_id: AnonymousId) -> Self {
        let conversation = Conversation::new(session, anonymous_id, HistoryWindow::default());
        let state = Self {
            conversation: RwSignal::new(conversation),
            api: GlooApi::default(),
        };
        provide_context(state);
        state
    }

    pub fn start_booking(&self) {
        if self.conversation.try_update(Conversation::start_booking) == Some(false) {
            log::debug!("Booking not started, a request is in flight");
        }
    }

    /// Submit the input box contents.
    pub fn send(&self, text: String) {
        let Some(submission) = self.conversation.try_update(|c| c.submit(&text)) else {
            return;
        };
        let conversation = self.conversation;
        let api = self.api;

        match submission {
            Submission::Ignored | Submission::Answered => {}
            Submission::Busy => log::debug!("Input ignored, a request is in flight"),
            Submission::Chat(pending) => spawn_local(async move {
                let outcome = api.send_chat(&pending.request).await;
                if let Err(e) = &outcome {
                    log::error!("Chat request failed: {e}");
                }
                if conversation
                    .try_update(|c| c.complete_chat(pending.ticket, outcome))
                    .is_none()
                {
                    log::debug!("Chat reply arrived after the widget was closed");
                }
            }),
            Submission::Booking(pending) => spawn_local(async move {
                let outcome = api.submit_booking(&pending.request).await;
                if let Err(e) = &outcome {
                    log::error!("Booking request failed: {e}");
                }
                if conversation
                    .try_update(|c| c.complete_booking(pending.ticket, outcome))
                    .is_none()
                {
                    log::debug!("Booking result arrived after the widget was closed");
                }
            }),
        }
    }
}
