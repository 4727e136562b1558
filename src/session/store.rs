//! Conversation session state
//!
//! [`ChatSession`] owns the saved histories, the reference to the
//! current history, and the live message mirror shown in the transcript.
//! All mutation goes through the operations here; renderers observe
//! state through accessors and the change-notification contract, and
//! every history mutation is persisted wholesale to the history slot.

use crate::error::Result;
use crate::gateway::CompletionGateway;
use crate::providers::ChatMessage;
use crate::session::{derive_title, ChatHistory, HistorySlot, Message, PLACEHOLDER_TITLE};
use std::sync::Arc;

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The exchange completed and was folded into a history
    Completed,
    /// The submission was ignored: empty input, or an exchange was
    /// already in flight. Not an error; nothing changed.
    Rejected,
}

/// Listener invoked after every state-changing operation
pub type ChangeListener = Box<dyn Fn() + Send>;

/// Conversation session state and operations
///
/// Invariants:
/// - history ids are unique within the session
/// - when `current_history_id` is set it references an entry in
///   `histories`, and the live mirror tracks that entry's messages
/// - `histories` is ordered most recently created/updated first
/// - at most one exchange is in flight at a time; submissions while busy
///   are rejected, not queued
pub struct ChatSession {
    histories: Vec<ChatHistory>,
    current_history_id: Option<String>,
    messages: Vec<Message>,
    in_flight: bool,
    gateway: Arc<CompletionGateway>,
    slot: HistorySlot,
    listeners: Vec<ChangeListener>,
}

impl ChatSession {
    /// Create a session, reading persisted histories once from the slot
    pub fn new(gateway: Arc<CompletionGateway>, slot: HistorySlot) -> Self {
        let histories = slot.load();
        tracing::debug!("Loaded {} saved histories", histories.len());
        Self {
            histories,
            current_history_id: None,
            messages: Vec::new(),
            in_flight: false,
            gateway,
            slot,
            listeners: Vec::new(),
        }
    }

    /// Saved histories, most recently created/updated first
    pub fn histories(&self) -> &[ChatHistory] {
        &self.histories
    }

    /// The live message mirror
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Id of the current history, if one is active
    pub fn current_history_id(&self) -> Option<&str> {
        self.current_history_id.as_deref()
    }

    /// Whether an exchange is currently in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Register a listener called after every state-changing operation
    pub fn subscribe(&mut self, listener: impl Fn() + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }

    /// Persist the histories collection wholesale
    fn save(&self) -> Result<()> {
        self.slot.save(&self.histories)
    }

    /// Start a new, empty chat and make it current
    ///
    /// Returns the id of the created history.
    pub fn new_chat(&mut self) -> Result<String> {
        let history = ChatHistory::new();
        let id = history.id.clone();

        self.histories.insert(0, history);
        self.current_history_id = Some(id.clone());
        self.messages.clear();

        self.save()?;
        self.notify();
        Ok(id)
    }

    /// Make the matching history current and load it into the mirror
    ///
    /// An unknown id is ignored; the return value tells the caller
    /// whether a history was found.
    pub fn select_history(&mut self, id: &str) -> bool {
        let Some(history) = self.histories.iter().find(|h| h.id == id) else {
            tracing::debug!("select_history: no history with id {}", id);
            return false;
        };

        self.messages = history.messages.clone();
        self.current_history_id = Some(history.id.clone());
        self.notify();
        true
    }

    /// Remove the matching history
    ///
    /// Deleting the current history also clears the current reference
    /// and empties the mirror. An unknown id is a no-op.
    pub fn delete_history(&mut self, id: &str) -> Result<bool> {
        let Some(position) = self.histories.iter().position(|h| h.id == id) else {
            return Ok(false);
        };

        self.histories.remove(position);
        if self.current_history_id.as_deref() == Some(id) {
            self.current_history_id = None;
            self.messages.clear();
        }

        self.save()?;
        self.notify();
        Ok(true)
    }

    /// Explicitly set a history's title
    ///
    /// The derivation rule (30 chars + ellipsis) applies to the given
    /// text. Returns false for an unknown id.
    pub fn set_history_title(&mut self, id: &str, text: &str) -> Result<bool> {
        let Some(position) = self.histories.iter().position(|h| h.id == id) else {
            return Ok(false);
        };

        let mut history = self.histories.remove(position);
        history.title = derive_title(text);
        history.touch();
        self.histories.insert(0, history);

        self.save()?;
        self.notify();
        Ok(true)
    }

    /// Submit user text and exchange it for an assistant reply
    ///
    /// Empty or whitespace-only input, or a submission while an exchange
    /// is in flight, is rejected silently. On success the user and
    /// assistant turns land in the mirror and the mirror is folded into
    /// the current history (one is created when none is active, titled
    /// from the user's first message). On failure the histories are
    /// untouched; the user's turn stays visible in the mirror and the
    /// error propagates to the caller once.
    pub async fn append_exchange(&mut self, user_text: &str) -> Result<SubmitOutcome> {
        if user_text.trim().is_empty() {
            tracing::debug!("Ignoring empty submission");
            return Ok(SubmitOutcome::Rejected);
        }
        if self.in_flight {
            tracing::debug!("Ignoring submission while an exchange is in flight");
            return Ok(SubmitOutcome::Rejected);
        }

        self.in_flight = true;
        self.messages.push(Message::user(user_text));
        self.notify();

        let turns: Vec<ChatMessage> = self.messages.iter().map(ChatMessage::from).collect();
        let result = self.gateway.complete(&turns).await;
        self.in_flight = false;
        let reply = result?;

        self.messages.push(Message::assistant(reply));

        match self.current_history_id.clone() {
            Some(id) => self.fold_into(&id),
            None => {
                let mut history = ChatHistory::new();
                history.title = self.title_from_mirror();
                history.messages = self.messages.clone();
                self.current_history_id = Some(history.id.clone());
                self.histories.insert(0, history);
            }
        }

        self.save()?;
        self.notify();
        Ok(SubmitOutcome::Completed)
    }

    /// Fold the mirror back into the history with the given id
    ///
    /// The title is recomputed only while the history still carries the
    /// placeholder; `updated_at` is bumped and the entry moves to the
    /// front to keep the most-recently-updated-first ordering.
    fn fold_into(&mut self, id: &str) {
        let Some(position) = self.histories.iter().position(|h| h.id == id) else {
            tracing::warn!("Current history {} is gone, dropping reference", id);
            self.current_history_id = None;
            return;
        };

        let mut history = self.histories.remove(position);
        history.messages = self.messages.clone();
        if history.is_untitled() {
            history.title = self.title_from_mirror();
        }
        history.touch();
        self.histories.insert(0, history);
    }

    /// Title derived from the first message of the mirror
    fn title_from_mirror(&self) -> String {
        match self.messages.first() {
            Some(first) => derive_title(&first.content),
            None => PLACEHOLDER_TITLE.to_string(),
        }
    }

    /// Resolve a full id or unique prefix to a history id
    ///
    /// Supports the short 8-char ids shown in listings. Returns None
    /// when nothing matches or the prefix is ambiguous.
    pub fn resolve_id(&self, prefix: &str) -> Option<String> {
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self.histories.iter().filter(|h| h.id.starts_with(prefix));
        let first = matches.next()?;
        if matches.next().is_some() {
            tracing::debug!("resolve_id: prefix {} is ambiguous", prefix);
            return None;
        }
        Some(first.id.clone())
    }
}
