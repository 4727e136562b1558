//! Conversation session management
//!
//! This module owns the conversation/history state machine: the message
//! data model, saved histories with derived titles, the session state
//! and its mutation operations, and whole-blob persistence to the
//! history slot.

pub mod history;
pub mod message;
pub mod persistence;
pub mod store;

pub use history::{derive_title, new_history_id, ChatHistory, PLACEHOLDER_TITLE};
pub use message::{Message, Role};
pub use persistence::HistorySlot;
pub use store::{ChatSession, SubmitOutcome};
