//! Session handshake with the embedding page.
//!
//! The receiver starts out holding a fallback session so the widget can
//! render immediately, then accepts `INIT_VET_CHAT` envelopes from the host.
//! The slot is single-valued: an accepted handshake replaces the session
//! wholesale, it never merges into the previous context.

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::models::Session;

/// Envelope `type` that carries a session payload.
pub const HANDSHAKE_TYPE: &str = "INIT_VET_CHAT";

/// Which handshakes may replace the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HandshakePolicy {
    /// Every handshake replaces the session, even after one was accepted.
    #[default]
    LastWins,
    /// Only the first handshake is accepted. The fallback never counts.
    FirstWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    Fallback,
    Handshake,
}

/// Session currently in the slot, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSession {
    pub session: Session,
    pub origin: SessionOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Replaced,
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Not a JSON object with a string `type`.
    NotAnEnvelope,
    /// An envelope for somebody else.
    OtherType,
    /// Right type, but the payload is not an object.
    MalformedPayload,
    /// [`HandshakePolicy::FirstWins`] and a handshake was already accepted.
    AlreadyResolved,
}

pub struct SessionReceiver {
    policy: HandshakePolicy,
    slot: watch::Sender<ResolvedSession>,
}

impl SessionReceiver {
    /// Creates the receiver with a freshly generated fallback session.
    pub fn new(policy: HandshakePolicy) -> Self {
        let fallback = ResolvedSession {
            session: Session::fallback(),
            origin: SessionOrigin::Fallback,
        };
        debug!(session_id = %fallback.session.session_id, "using fallback session");
        let (slot, _) = watch::channel(fallback);
        Self { policy, slot }
    }

    pub fn policy(&self) -> HandshakePolicy {
        self.policy
    }

    pub fn current(&self) -> Session {
        self.slot.borrow().session.clone()
    }

    pub fn origin(&self) -> SessionOrigin {
        self.slot.borrow().origin
    }

    /// Watches the slot; the receiver is notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<ResolvedSession> {
        self.slot.subscribe()
    }

    /// Applies a raw message, as posted by the host page, to the slot.
    pub fn deliver_str(&self, raw: &str) -> Delivery {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => self.deliver(&value),
            Err(_) => Delivery::Ignored(IgnoreReason::NotAnEnvelope),
        }
    }

    pub fn deliver(&self, message: &Value) -> Delivery {
        let session = match parse_envelope(message) {
            Ok(session) => session,
            Err(reason) => {
                if reason == IgnoreReason::MalformedPayload {
                    warn!("Ignoring {HANDSHAKE_TYPE} message with a non-object payload");
                }
                return Delivery::Ignored(reason);
            }
        };

        if self.policy == HandshakePolicy::FirstWins && self.origin() == SessionOrigin::Handshake {
            debug!(session_id = %session.session_id, "handshake ignored, session already resolved");
            return Delivery::Ignored(IgnoreReason::AlreadyResolved);
        }

        debug!(session_id = %session.session_id, "session replaced by handshake");
        self.slot.send_replace(ResolvedSession {
            session,
            origin: SessionOrigin::Handshake,
        });
        Delivery::Replaced
    }
}

impl Default for SessionReceiver {
    fn default() -> Self {
        Self::new(HandshakePolicy::default())
    }
}

fn parse_envelope(message: &Value) -> Result<Session, IgnoreReason> {
    let kind = message
        .get("type")
        .and_then(Value::as_str)
        .ok_or(IgnoreReason::NotAnEnvelope)?;
    if kind != HANDSHAKE_TYPE {
        return Err(IgnoreReason::OtherType);
    }

    let payload = message
        .get("payload")
        .filter(|p| p.is_object())
        .ok_or(IgnoreReason::MalformedPayload)?;

    // Fields are not validated; a wrongly typed field is treated as absent.
    let session_id = payload
        .get("sessionId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let context = payload
        .get("context")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Ok(Session { session_id, context })
}
