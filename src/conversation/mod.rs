//! Conversation state machine.
//!
//! Pure transitions: nothing in here performs I/O. Inputs that need the
//! network hand back a pending request carrying a ticket, and the caller
//! reports the outcome through `complete_chat` / `complete_booking`. Only one
//! request may be in flight at a time.

pub mod booking;
pub mod history;

#[cfg(test)]
mod proptests;

use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::{
    AnonymousId, AppointmentDraft, BookingRequest, ChatRequest, Context, Message, Session,
};

use booking::{BOOKING_CONFIRMED, BOOKING_FAILED, BOOKING_STEPS};
pub use booking::{BookingField, BookingStep};
pub use history::{ConversationHistory, HistoryWindow};

pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";
pub const CHAT_PLACEHOLDER: &str = "Ask about your pet...";
pub const BOOKING_PLACEHOLDER: &str = "Type your answer...";

/// Greeting shown as the first bot message.
pub fn greeting(session: &Session) -> String {
    match session.pet_name() {
        Some(pet) => format!("Hi! How can I help {pet}?"),
        None => "Hi! How can I help your pet today?".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    FreeChat,
    /// `step` indexes [`BOOKING_STEPS`].
    Booking { step: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Chat,
    Booking,
}

/// The single request slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub ticket: u64,
    pub kind: RequestKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingChat {
    pub ticket: u64,
    pub request: ChatRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBooking {
    pub ticket: u64,
    pub request: BookingRequest,
}

/// What a submitted input turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Blank input; nothing changed.
    Ignored,
    /// A request is already in flight; nothing changed.
    Busy,
    /// A booking answer was stored and the next question asked.
    Answered,
    /// Send this chat turn, then call [`Conversation::complete_chat`].
    Chat(PendingChat),
    /// Submit this booking, then call [`Conversation::complete_booking`].
    Booking(PendingBooking),
}

#[derive(Debug, Clone)]
pub struct Conversation {
    anonymous_id: AnonymousId,
    context: Context,
    window: HistoryWindow,
    messages: Vec<Message>,
    history: ConversationHistory,
    mode: FlowMode,
    draft_seed: AppointmentDraft,
    draft: AppointmentDraft,
    in_flight: Option<InFlight>,
    pending_input: Option<String>,
    next_ticket: u64,
}

impl Conversation {
    pub fn new(session: &Session, anonymous_id: AnonymousId, window: HistoryWindow) -> Self {
        let draft_seed = AppointmentDraft::seeded(session.pet_name());
        Self {
            anonymous_id,
            context: session.context.clone(),
            window,
            messages: vec![Message::bot(greeting(session))],
            history: ConversationHistory::new(),
            mode: FlowMode::FreeChat,
            draft: draft_seed.clone(),
            draft_seed,
            in_flight: None,
            pending_input: None,
            next_ticket: 1,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn anonymous_id(&self) -> &AnonymousId {
        &self.anonymous_id
    }

    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    /// A chat reply is outstanding (typing indicator).
    pub fn is_loading(&self) -> bool {
        matches!(self.in_flight, Some(InFlight { kind: RequestKind::Chat, .. }))
    }

    /// Any request is outstanding; input is not accepted.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_booking(&self) -> bool {
        matches!(self.mode, FlowMode::Booking { .. })
    }

    pub fn can_start_booking(&self) -> bool {
        !self.is_booking() && !self.is_busy()
    }

    pub fn placeholder(&self) -> &'static str {
        if self.is_booking() {
            BOOKING_PLACEHOLDER
        } else {
            CHAT_PLACEHOLDER
        }
    }

    /// Enters booking at the first step and asks its question. Restarts an
    /// unfinished flow from scratch. Refused while a request is in flight.
    pub fn start_booking(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.mode = FlowMode::Booking { step: 0 };
        self.draft = self.draft_seed.clone();
        self.messages.push(Message::bot(BOOKING_STEPS[0].question));
        debug!("booking flow started");
        true
    }

    pub fn submit(&mut self, input: &str) -> Submission {
        if input.trim().is_empty() {
            return Submission::Ignored;
        }
        if self.is_busy() {
            return Submission::Busy;
        }

        self.messages.push(Message::user(input));

        match self.mode {
            FlowMode::Booking { step } => self.answer(step, input),
            FlowMode::FreeChat => Submission::Chat(self.begin_chat(input)),
        }
    }

    fn answer(&mut self, step: usize, input: &str) -> Submission {
        let current = BOOKING_STEPS[step];
        self.draft.set(current.field, input);

        if let Some(next) = BOOKING_STEPS.get(step + 1) {
            self.mode = FlowMode::Booking { step: step + 1 };
            self.messages.push(Message::bot(next.question));
            debug!(step = step + 1, "booking step advanced");
            return Submission::Answered;
        }

        // The final answer is merged into the draft above before the payload
        // is assembled, so the request always carries all four fields.
        let request = BookingRequest {
            session_id: self.anonymous_id.clone(),
            draft: self.draft.clone(),
        };
        let ticket = self.occupy(RequestKind::Booking);
        debug!(ticket, "booking submission pending");
        Submission::Booking(PendingBooking { ticket, request })
    }

    fn begin_chat(&mut self, input: &str) -> PendingChat {
        let request = ChatRequest {
            message: input.to_string(),
            context: self.context.clone(),
            anonymous_id: self.anonymous_id.clone(),
            conversation_history: self.history.window(self.window).to_vec(),
        };
        self.pending_input = Some(input.to_string());
        let ticket = self.occupy(RequestKind::Chat);
        debug!(ticket, history = request.conversation_history.len(), "chat turn pending");
        PendingChat { ticket, request }
    }

    fn occupy(&mut self, kind: RequestKind) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(InFlight { ticket, kind });
        ticket
    }

    fn release(&mut self, ticket: u64, kind: RequestKind) -> bool {
        match self.in_flight {
            Some(slot) if slot.ticket == ticket && slot.kind == kind => {
                self.in_flight = None;
                true
            }
            _ => {
                debug!(ticket, ?kind, "stale completion dropped");
                false
            }
        }
    }

    /// Applies the outcome of a chat turn. Returns `false` if `ticket` is not
    /// the request currently in flight.
    pub fn complete_chat(&mut self, ticket: u64, outcome: Result<String, ClientError>) -> bool {
        if !self.release(ticket, RequestKind::Chat) {
            return false;
        }
        let input = self.pending_input.take().unwrap_or_default();

        match outcome {
            Ok(reply) => {
                self.messages.push(Message::bot(reply.clone()));
                self.history.push_turn(input, reply);
            }
            Err(e) => {
                warn!("Chat request failed: {e}");
                self.messages.push(Message::bot(CONNECTION_ERROR));
            }
        }
        true
    }

    /// Applies the outcome of a booking submission and leaves booking mode
    /// whatever happened. Returns `false` for a stale `ticket`.
    pub fn complete_booking(&mut self, ticket: u64, outcome: Result<(), ClientError>) -> bool {
        if !self.release(ticket, RequestKind::Booking) {
            return false;
        }

        match outcome {
            Ok(()) => self.messages.push(Message::bot(BOOKING_CONFIRMED)),
            Err(e) => {
                warn!("Booking submission failed: {e}");
                self.messages.push(Message::bot(BOOKING_FAILED));
            }
        }
        self.mode = FlowMode::FreeChat;
        self.draft = self.draft_seed.clone();
        true
    }
}
