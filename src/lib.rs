//! Session handshake and conversation core of the Vet Assistant chat widget.
//!
//! The crate is target-independent. The browser widget (`frontend/`) and the
//! `vet-chat` terminal host plug their own storage and HTTP backends into the
//! traits defined here.

pub mod api;
pub mod config;
pub mod conversation;
pub mod errors;
pub mod identity;
pub mod models;
pub mod service;
pub mod session;
pub mod store;

pub use api::{BookingClient, DialogueClient};
pub use config::Config;
pub use conversation::{Conversation, FlowMode, HistoryWindow, Submission};
pub use errors::{ClientError, ConfigError, StorageError};
pub use identity::IdentityStore;
pub use models::{AnonymousId, Message, Sender, Session};
pub use service::chat_service::{ChatService, Submitted};
pub use session::{Delivery, HandshakePolicy, SessionReceiver};
pub use store::KeyValueStore;
