//! Saved conversation histories
//!
//! A [`ChatHistory`] is a named, persisted conversation. Titles are
//! derived from the first user message and never recomputed implicitly;
//! only the explicit title-update operation changes them afterwards.

use crate::session::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a history that has no derived title yet
pub const PLACEHOLDER_TITLE: &str = "New chat";

/// Maximum characters of the source text kept in a derived title
const TITLE_MAX_CHARS: usize = 30;

/// A saved conversation
///
/// Invariants:
/// - `id` is unique across all histories held by one session
/// - `updated_at >= created_at`, and `updated_at` never decreases across
///   successive mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistory {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// User-facing title, at most 33 chars including the ellipsis
    pub title: String,
    /// Ordered conversation turns
    pub messages: Vec<Message>,
    /// When the history was created
    pub created_at: DateTime<Utc>,
    /// When the history was last updated
    pub updated_at: DateTime<Utc>,
}

impl ChatHistory {
    /// Creates an empty history with a placeholder title
    ///
    /// # Examples
    ///
    /// ```
    /// use kaiwa::session::ChatHistory;
    ///
    /// let history = ChatHistory::new();
    /// assert!(history.messages.is_empty());
    /// assert_eq!(history.created_at, history.updated_at);
    /// ```
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: new_history_id(),
            title: PLACEHOLDER_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the title is still the creation placeholder
    pub fn is_untitled(&self) -> bool {
        self.title == PLACEHOLDER_TITLE
    }

    /// Bumps `updated_at` to the current instant
    ///
    /// `updated_at` is monotonically non-decreasing; a clock that reads
    /// earlier than the stored value leaves it unchanged.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a fresh opaque history identifier
pub fn new_history_id() -> String {
    Uuid::new_v4().to_string()
}

/// Derive a history title from candidate text
///
/// Text of at most 30 characters is the title verbatim; longer text is
/// truncated to its first 30 characters plus `"..."`.
///
/// # Examples
///
/// ```
/// use kaiwa::session::derive_title;
///
/// assert_eq!(derive_title("Hello"), "Hello");
/// assert_eq!(
///     derive_title("This is a rather long message that keeps going"),
///     "This is a rather long message ...",
/// );
/// ```
pub fn derive_title(text: &str) -> String {
    if text.chars().count() <= TITLE_MAX_CHARS {
        text.to_string()
    } else {
        let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
        title.push_str("...");
        title
    }
}
